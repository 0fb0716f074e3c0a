//! The pending edit set a profile editing session accumulates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use zdir_chain::memo::{EditMemo, Identity, LinkToken, ProfileField};

/// A profile's editable field values, as read from storage or typed into
/// the draft form.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// The payment address the profile is bound to.
    pub address: String,

    /// The public display name.
    pub name: String,

    /// The short biography.
    pub bio: String,

    /// The profile image url.
    pub profile_image_url: String,
}

impl ProfileRecord {
    fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Bio => &self.bio,
            ProfileField::ProfileImageUrl => &self.profile_image_url,
        }
    }
}

/// The changes a session is preparing to send: changed profile fields
/// (non-blank only) plus the reconciled link token list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PendingEditSet {
    address: Option<String>,
    fields: IndexMap<ProfileField, String>,
    link_tokens: Vec<LinkToken>,
}

impl PendingEditSet {
    /// Creates an empty edit set.
    pub fn new() -> PendingEditSet {
        PendingEditSet::default()
    }

    /// Diffs a draft form against the stored record.
    ///
    /// A field counts as changed when the draft value is non-blank and
    /// differs from the stored value; clearing a field is not expressible
    /// in the edit payload, so blank draft values are just "no change".
    pub fn from_draft(original: &ProfileRecord, draft: &ProfileRecord) -> PendingEditSet {
        let mut pending = PendingEditSet::new();

        if !draft.address.trim().is_empty() && draft.address != original.address {
            pending.address = Some(draft.address.clone());
        }
        for field in ProfileField::ALL {
            let value = draft.field(field);
            if !value.trim().is_empty() && value != original.field(field) {
                pending.fields.insert(field, value.to_string());
            }
        }

        pending
    }

    /// The changed address, if the owner is changing it.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Sets or clears the changed address; blank values clear it.
    pub fn set_address(&mut self, address: impl Into<String>) {
        let address = address.into();
        if address.trim().is_empty() {
            self.address = None;
        } else {
            self.address = Some(address);
        }
    }

    /// The changed profile fields.
    pub fn fields(&self) -> &IndexMap<ProfileField, String> {
        &self.fields
    }

    /// Sets a changed field value; blank values drop the change instead
    /// of recording an empty one.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.fields.shift_remove(&field);
        } else {
            self.fields.insert(field, value);
        }
    }

    /// The reconciled link token list.
    pub fn link_tokens(&self) -> &[LinkToken] {
        &self.link_tokens
    }

    /// Replaces the link token list with a freshly reconciled one.
    pub fn set_link_tokens(&mut self, tokens: Vec<LinkToken>) {
        self.link_tokens = tokens;
    }

    /// True when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.fields.is_empty() && self.link_tokens.is_empty()
    }

    /// Packs this edit set into a memo payload for `identity`.
    pub fn to_memo(&self, identity: Identity) -> EditMemo {
        EditMemo {
            identity,
            address: self.address.clone(),
            fields: self.fields.clone(),
            link_tokens: self.link_tokens.clone(),
        }
    }
}
