//! Reconciling an edited link collection into diff tokens.
//!
//! The edit form never mutates a token list in place. On every edit, the
//! whole token list is recomputed from the original collection, the
//! current collection, and the owner's outstanding verification requests,
//! so the output is always a pure function of current state with no
//! accumulated drift. [`Reconciler`] memoizes on a content hash for the
//! per-keystroke callers; [`recompute`] is the correctness baseline.

use std::{
    collections::{hash_map::DefaultHasher, HashMap, HashSet},
    hash::{Hash, Hasher},
};

use zdir_chain::memo::{LinkId, LinkRef, LinkToken};

use crate::link::LinkEntry;

#[cfg(test)]
mod tests;

/// Computes the diff token list for an edited link collection.
///
/// `verify_requests` carries the owner's explicit verification requests:
/// `VerifyExisting` for persisted rows and `VerifyNew` for rows that only
/// exist client-side. Any other token kind in it is ignored, which is what
/// makes feeding a previous output back in harmless.
///
/// Guarantees:
///
/// - at most one token governs a logical link, and a removal always
///   supersedes a verification of the same reference;
/// - duplicate urls in `current` collapse to a single token;
/// - idempotent: recomputing with an unchanged input triple, or with the
///   previous output as `verify_requests`, yields an identical list.
///
/// Runs in O(n) over the number of rows and requests.
pub fn recompute(
    original: &[LinkEntry],
    current: &[LinkEntry],
    verify_requests: &[LinkToken],
) -> Vec<LinkToken> {
    // Index the original collection by url. Later duplicates win, which
    // only matters for collections that were already degenerate.
    let mut original_by_url: HashMap<&str, Option<LinkId>> = HashMap::new();
    for entry in original {
        if !entry.is_blank() {
            original_by_url.insert(entry.trimmed_url(), entry.id);
        }
    }

    let current_urls: HashSet<&str> = current
        .iter()
        .filter(|entry| !entry.is_blank())
        .map(LinkEntry::trimmed_url)
        .collect();
    let unpersisted_urls: HashSet<&str> = current
        .iter()
        .filter(|entry| entry.id.is_none() && !entry.is_blank())
        .map(LinkEntry::trimmed_url)
        .collect();
    let current_ids: HashSet<LinkId> = current.iter().filter_map(|entry| entry.id).collect();

    // Unpersisted current urls that the original collection has never
    // seen: the only rows a stale verification request can retarget to.
    let mut fresh_urls: Vec<&str> = Vec::new();
    for entry in current {
        if entry.id.is_some() || entry.is_blank() {
            continue;
        }
        let url = entry.trimmed_url();
        if !original_by_url.contains_key(url) && !fresh_urls.contains(&url) {
            fresh_urls.push(url);
        }
    }

    let mut tokens: Vec<LinkToken> = Vec::new();

    // Removals: original rows whose url is gone from the current
    // collection. Persisted rows are removed by id, client-only rows by
    // their bare url.
    for entry in original {
        if entry.is_blank() {
            continue;
        }
        let url = entry.trimmed_url();
        if !current_urls.contains(url) {
            tokens.push(match entry.id {
                Some(id) => LinkToken::Remove(LinkRef::Id(id)),
                None => LinkToken::Remove(LinkRef::Url(url.to_string())),
            });
        }
    }

    // Normalize the request list: trim request urls, and retarget a stale
    // `VerifyNew` when the owner edited the pending row's url in place
    // (exactly one fresh row to retarget to), otherwise drop it.
    let mut normalized: Vec<LinkToken> = Vec::new();
    for request in verify_requests {
        match request {
            LinkToken::VerifyNew(url) => {
                if unpersisted_urls.contains(url.trim()) {
                    normalized.push(LinkToken::VerifyNew(url.trim().to_string()));
                } else if let [replacement] = &fresh_urls[..] {
                    normalized.push(LinkToken::VerifyNew(replacement.to_string()));
                }
            }
            LinkToken::VerifyExisting(_) => normalized.push(request.clone()),
            LinkToken::Add(_) | LinkToken::Remove(_) => {}
        }
    }

    // Additions: new client-side rows, each either an explicit
    // verify-new or a plain add, never both.
    let mut seen_new_urls: HashSet<&str> = HashSet::new();
    for entry in current {
        if entry.id.is_some() || entry.is_blank() {
            continue;
        }
        let url = entry.trimmed_url();
        if original_by_url.contains_key(url) || !seen_new_urls.insert(url) {
            continue;
        }
        let verify_requested = normalized
            .iter()
            .any(|token| matches!(token, LinkToken::VerifyNew(requested) if requested.trim() == url));
        tokens.push(if verify_requested {
            LinkToken::VerifyNew(url.to_string())
        } else {
            LinkToken::Add(url.to_string())
        });
    }

    // Carry through the surviving explicit requests. A `VerifyExisting`
    // for a row that no longer exists has nothing to verify.
    for request in &normalized {
        match request {
            LinkToken::VerifyExisting(id) if current_ids.contains(id) => {
                tokens.push(request.clone());
            }
            LinkToken::VerifyNew(_) => tokens.push(request.clone()),
            _ => {}
        }
    }

    // De-duplicate, preserving first-seen order.
    let mut seen: HashSet<LinkToken> = HashSet::new();
    tokens.retain(|token| seen.insert(token.clone()));

    // A removal supersedes any verification of the same reference.
    let removed_ids: HashSet<LinkId> = tokens
        .iter()
        .filter_map(|token| match token {
            LinkToken::Remove(LinkRef::Id(id)) => Some(*id),
            _ => None,
        })
        .collect();
    let removed_urls: HashSet<&str> = tokens
        .iter()
        .filter_map(|token| match token {
            LinkToken::Remove(LinkRef::Url(url)) => Some(url.as_str()),
            _ => None,
        })
        .collect();
    let tokens = tokens
        .iter()
        .filter(|token| match token {
            LinkToken::VerifyExisting(id) => !removed_ids.contains(id),
            LinkToken::VerifyNew(url) => !removed_urls.contains(url.as_str()),
            _ => true,
        })
        .cloned()
        .collect();

    tokens
}

/// A memoizing wrapper around [`recompute`].
///
/// Callers re-reconcile on every keystroke; hashing the input triple is
/// much cheaper than rebuilding the token list, and rapid input mostly
/// re-presents identical collections (focus changes, cursor moves).
#[derive(Debug, Default)]
pub struct Reconciler {
    cache: Option<(u64, Vec<LinkToken>)>,
}

impl Reconciler {
    /// Creates an empty reconciler.
    pub fn new() -> Reconciler {
        Reconciler::default()
    }

    /// Like [`recompute`], but served from cache when the input triple's
    /// content hash is unchanged.
    pub fn recompute(
        &mut self,
        original: &[LinkEntry],
        current: &[LinkEntry],
        verify_requests: &[LinkToken],
    ) -> Vec<LinkToken> {
        let fingerprint = fingerprint(original, current, verify_requests);
        if let Some((cached_fingerprint, cached_tokens)) = &self.cache {
            if *cached_fingerprint == fingerprint {
                return cached_tokens.clone();
            }
        }

        let tokens = recompute(original, current, verify_requests);
        self.cache = Some((fingerprint, tokens.clone()));
        tokens
    }
}

/// Content hash of a reconciliation input triple.
///
/// Row keys are deliberately excluded: they are client-local identity,
/// not content, and hashing them would defeat the cache whenever a
/// collection is rebuilt from the same data.
fn fingerprint(
    original: &[LinkEntry],
    current: &[LinkEntry],
    verify_requests: &[LinkToken],
) -> u64 {
    let mut hasher = DefaultHasher::new();

    for collection in [original, current] {
        collection.len().hash(&mut hasher);
        for entry in collection {
            entry.id.hash(&mut hasher);
            entry.trimmed_url().hash(&mut hasher);
            entry.is_verified.hash(&mut hasher);
            entry.verification_expires_at.hash(&mut hasher);
        }
    }
    verify_requests.hash(&mut hasher);

    hasher.finish()
}
