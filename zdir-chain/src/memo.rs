//! The compact edit-payload grammar carried in transaction memos.
//!
//! An edit memo packs a directory identity, its changed profile fields,
//! and a list of link diff tokens into a single short string:
//!
//! ```text
//! {z:42,a:"zs1...",n:"Alice",b:"Building things",l:["+alice.example","!3"]}
//! ```
//!
//! The grammar is intentionally not JSON: it has to stay legible inside a
//! wallet's memo viewer, survive manual copy-paste, and spend as few of
//! the 512 memo bytes as possible on structure. Keys are single-character
//! abbreviations of the profile field names, values are double-quoted, and
//! the identity is a bare number (or `?` while a profile is unclaimed).
//!
//! Known limitation: values are embedded without escaping, so a value that
//! itself contains a `"` corrupts the payload. The verification service
//! rejects such memos; this encoder does not try to repair them.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde_with::{DeserializeFromStr, SerializeDisplay};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;


/// A directory identity, as carried in the `z` field of an edit memo.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, SerializeDisplay, DeserializeFromStr)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum Identity {
    /// An existing profile, by its storage id.
    Claimed(u64),

    /// A profile being created, which has no storage id yet.
    Unclaimed,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Claimed(id) => write!(f, "{id}"),
            Identity::Unclaimed => f.write_str("?"),
        }
    }
}

impl FromStr for Identity {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "?" {
            return Ok(Identity::Unclaimed);
        }
        s.parse()
            .map(Identity::Claimed)
            .map_err(|_| MemoError::Parse("invalid identity"))
    }
}

impl From<u64> for Identity {
    fn from(id: u64) -> Self {
        Identity::Claimed(id)
    }
}

/// The storage id of a persisted link row.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct LinkId(pub u64);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkId {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(LinkId)
            .map_err(|_| MemoError::Parse("invalid link id"))
    }
}

/// A reference to a logical link: its storage id when the row is
/// persisted, or its bare url when it only exists client-side.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum LinkRef {
    /// A persisted row, by storage id.
    Id(LinkId),

    /// An unpersisted row, by url.
    Url(String),
}

impl fmt::Display for LinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRef::Id(id) => write!(f, "{id}"),
            LinkRef::Url(url) => f.write_str(url),
        }
    }
}

/// One incremental change to a profile's link collection.
///
/// Tokens have a compact wire form, carried inside the memo's `l` list:
/// `+url` adds, `-ref` removes, `!id` requests verification of a persisted
/// link, and `+!url` adds and requests verification in one step.
///
/// At most one token governs a given logical link, and a [`Remove`] for a
/// reference always supersedes any verification token for the same
/// reference. [`crate::memo`]'s encoder trusts its caller on this; the
/// reconciler in `zdir-verify` is what enforces it.
///
/// [`Remove`]: LinkToken::Remove
#[derive(Clone, Debug, Eq, PartialEq, Hash, SerializeDisplay, DeserializeFromStr)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum LinkToken {
    /// Add a new, unverified link.
    Add(String),

    /// Remove a link.
    Remove(LinkRef),

    /// Request verification of an already-persisted link.
    VerifyExisting(LinkId),

    /// Add a new link and request its verification in the same edit.
    VerifyNew(String),
}

impl LinkToken {
    /// Returns true for the two verification-requesting variants.
    pub fn is_verify(&self) -> bool {
        matches!(self, LinkToken::VerifyExisting(_) | LinkToken::VerifyNew(_))
    }
}

impl fmt::Display for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkToken::Add(url) => write!(f, "+{url}"),
            LinkToken::Remove(link) => write!(f, "-{link}"),
            LinkToken::VerifyExisting(id) => write!(f, "!{id}"),
            LinkToken::VerifyNew(url) => write!(f, "+!{url}"),
        }
    }
}

impl FromStr for LinkToken {
    type Err = MemoError;

    /// Parses a token from its wire form.
    ///
    /// A removal reference that is all digits is read back as a storage
    /// id; urls never consist of digits alone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(url) = s.strip_prefix("+!") {
            if url.is_empty() {
                return Err(MemoError::Parse("empty verify-new url"));
            }
            return Ok(LinkToken::VerifyNew(url.to_string()));
        }
        if let Some(url) = s.strip_prefix('+') {
            if url.is_empty() {
                return Err(MemoError::Parse("empty add url"));
            }
            return Ok(LinkToken::Add(url.to_string()));
        }
        if let Some(id) = s.strip_prefix('!') {
            return id.parse().map(LinkToken::VerifyExisting);
        }
        if let Some(target) = s.strip_prefix('-') {
            if target.is_empty() {
                return Err(MemoError::Parse("empty removal reference"));
            }
            let link = if target.bytes().all(|b| b.is_ascii_digit()) {
                LinkRef::Id(target.parse()?)
            } else {
                LinkRef::Url(target.to_string())
            };
            return Ok(LinkToken::Remove(link));
        }
        Err(MemoError::Parse("unknown link token"))
    }
}

/// A profile field that can be changed through an edit memo.
///
/// The `address` field is not listed here: it has its own reserved slot
/// right after the identity, because the verification service reads it
/// before anything else.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, SerializeDisplay, DeserializeFromStr)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum ProfileField {
    /// The public display name.
    Name,

    /// The short biography.
    Bio,

    /// The profile image url.
    ProfileImageUrl,
}

impl ProfileField {
    /// Every field, in the canonical order they serialize in.
    pub const ALL: [ProfileField; 3] = [
        ProfileField::Name,
        ProfileField::Bio,
        ProfileField::ProfileImageUrl,
    ];

    /// The single-character memo key for this field.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ProfileField::Name => "n",
            ProfileField::Bio => "b",
            ProfileField::ProfileImageUrl => "i",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileField::Name => "name",
            ProfileField::Bio => "bio",
            ProfileField::ProfileImageUrl => "profile_image_url",
        };
        f.write_str(name)
    }
}

impl FromStr for ProfileField {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" | "n" => Ok(ProfileField::Name),
            "bio" | "b" => Ok(ProfileField::Bio),
            "profile_image_url" | "i" => Ok(ProfileField::ProfileImageUrl),
            _ => Err(MemoError::Parse("unknown profile field")),
        }
    }
}

/// A complete edit payload, ready to encode into a memo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditMemo {
    /// The identity the edit applies to.
    pub identity: Identity,

    /// A new payment address, when the owner is changing it.
    pub address: Option<String>,

    /// Changed profile fields and their new values.
    pub fields: IndexMap<ProfileField, String>,

    /// Link collection changes, in reconciler output order.
    pub link_tokens: Vec<LinkToken>,
}

impl EditMemo {
    /// Creates an empty edit memo for `identity`.
    pub fn new(identity: Identity) -> EditMemo {
        EditMemo {
            identity,
            address: None,
            fields: IndexMap::new(),
            link_tokens: Vec::new(),
        }
    }

    /// Encodes this edit into the memo grammar.
    ///
    /// Blank values are dropped entirely rather than emitted as empty
    /// tokens, a changed address always comes right after the identity,
    /// fields follow in the canonical `n`, `b`, `i` order, and link tokens
    /// close the payload as a quoted list under `l`. An edit with nothing
    /// in it encodes to the minimal `{z:<identity>}` form.
    pub fn encode(&self) -> String {
        let mut payload = format!("{{z:{}", self.identity);

        if let Some(address) = &self.address {
            if !address.trim().is_empty() {
                payload.push_str(&format!(",a:\"{}\"", address.trim()));
            }
        }

        for field in ProfileField::ALL {
            if let Some(value) = self.fields.get(&field) {
                if !value.trim().is_empty() {
                    payload.push_str(&format!(",{}:\"{value}\"", field.abbreviation()));
                }
            }
        }

        if !self.link_tokens.is_empty() {
            let tokens: Vec<String> = self
                .link_tokens
                .iter()
                .map(|token| format!("\"{token}\""))
                .collect();
            payload.push_str(&format!(",l:[{}]", tokens.join(",")));
        }

        payload.push('}');
        payload
    }
}

impl fmt::Display for EditMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A memo grammar error.
#[derive(thiserror::Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum MemoError {
    /// The input was not a recognizable piece of the grammar.
    #[error("parse error: {0}")]
    Parse(&'static str),
}
