//! In-memory link rows behind a profile's editable link list.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use zdir_chain::memo::LinkId;

/// How long a link verification stays current after its last proof.
pub const VERIFICATION_VALIDITY_DAYS: i64 = 60;

/// A client-local row identity.
///
/// Keeps a row stable across edits so reordering and retyping don't
/// confuse the form; never serialized and never sent anywhere.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RowKey(u64);

impl RowKey {
    /// Creates a fresh, unique-enough row key.
    pub fn new() -> RowKey {
        RowKey(rand::random())
    }
}

impl Default for RowKey {
    fn default() -> Self {
        RowKey::new()
    }
}

/// One link row, as held in a profile editing session.
///
/// `id` is present exactly when the row is already persisted in storage;
/// a freshly-added row has no id until the owner's edit is confirmed and
/// written back.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// The storage id, for persisted rows.
    pub id: Option<LinkId>,

    /// The link url, as typed.
    pub url: String,

    /// Whether the link has a current ownership verification.
    pub is_verified: bool,

    /// When the verification lapses, for verified links.
    pub verification_expires_at: Option<DateTime<Utc>>,

    /// Client-local row identity; stable across edits, never serialized.
    #[serde(skip, default)]
    pub row_key: RowKey,
}

impl LinkEntry {
    /// Creates a fresh, unpersisted row for `url`.
    pub fn new(url: impl Into<String>) -> LinkEntry {
        LinkEntry {
            id: None,
            url: url.into(),
            is_verified: false,
            verification_expires_at: None,
            row_key: RowKey::new(),
        }
    }

    /// Creates a row loaded from storage.
    pub fn persisted(
        id: LinkId,
        url: impl Into<String>,
        is_verified: bool,
        verification_expires_at: Option<DateTime<Utc>>,
    ) -> LinkEntry {
        LinkEntry {
            id: Some(id),
            url: url.into(),
            is_verified,
            verification_expires_at,
            row_key: RowKey::new(),
        }
    }

    /// The url with surrounding whitespace removed.
    pub fn trimmed_url(&self) -> &str {
        self.url.trim()
    }

    /// True when the row has no usable url.
    pub fn is_blank(&self) -> bool {
        self.trimmed_url().is_empty()
    }

    /// Whether the row's verification is still current at `now`.
    ///
    /// Unverified rows are never current; verified rows without an expiry
    /// on record stay current until storage says otherwise.
    pub fn is_verification_current(&self, now: DateTime<Utc>) -> bool {
        if !self.is_verified {
            return false;
        }
        match self.verification_expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

/// Computes the end of a verification validity window.
///
/// The window runs [`VERIFICATION_VALIDITY_DAYS`] from the later of the
/// two proof timestamps; `None` when neither has ever happened.
pub fn good_thru(
    since: Option<DateTime<Utc>>,
    last_signed: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let latest = match (since, last_signed) {
        (Some(since), Some(last_signed)) => Some(since.max(last_signed)),
        (since, last_signed) => since.or(last_signed),
    };

    latest.map(|latest| latest + Duration::days(VERIFICATION_VALIDITY_DAYS))
}
