//! Property tests for link diff reconciliation.

use proptest::prelude::*;

use zdir_chain::memo::{LinkId, LinkRef, LinkToken};

use crate::{link::LinkEntry, reconcile::recompute};

/// A small url pool, so collections actually collide.
fn url_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a.example".to_string(),
        "b.example".to_string(),
        "c.example".to_string(),
        "d.example".to_string(),
        " a.example ".to_string(),
        String::new(),
    ])
}

fn entry_strategy() -> impl Strategy<Value = LinkEntry> {
    (prop::option::of(0u64..4), url_strategy()).prop_map(|(id, url)| match id {
        Some(id) => LinkEntry::persisted(LinkId(id), url, false, None),
        None => LinkEntry::new(url),
    })
}

fn collection_strategy() -> impl Strategy<Value = Vec<LinkEntry>> {
    prop::collection::vec(entry_strategy(), 0..6)
}

fn request_strategy() -> impl Strategy<Value = Vec<LinkToken>> {
    prop::collection::vec(
        prop_oneof![
            (0u64..4).prop_map(|id| LinkToken::VerifyExisting(LinkId(id))),
            url_strategy().prop_map(LinkToken::VerifyNew),
        ],
        0..4,
    )
}

/// The url or id a token governs, for exclusivity checks.
fn reference(token: &LinkToken) -> (Option<&str>, Option<LinkId>) {
    match token {
        LinkToken::Add(url) | LinkToken::VerifyNew(url) => (Some(url.as_str()), None),
        LinkToken::Remove(LinkRef::Url(url)) => (Some(url.as_str()), None),
        LinkToken::Remove(LinkRef::Id(id)) => (None, Some(*id)),
        LinkToken::VerifyExisting(id) => (None, Some(*id)),
    }
}

proptest! {
    /// Recomputing over the previous output changes nothing.
    #[test]
    fn recompute_is_idempotent(
        original in collection_strategy(),
        current in collection_strategy(),
        requests in request_strategy(),
    ) {
        let _init_guard = zdir_test::init();

        let first = recompute(&original, &current, &requests);
        let second = recompute(&original, &current, &first);
        prop_assert_eq!(first, second);
    }

    /// At most one token governs a given logical link.
    #[test]
    fn references_are_exclusive(
        original in collection_strategy(),
        current in collection_strategy(),
        requests in request_strategy(),
    ) {
        let _init_guard = zdir_test::init();

        let tokens = recompute(&original, &current, &requests);

        let mut urls = std::collections::HashSet::new();
        let mut ids = std::collections::HashSet::new();
        for token in &tokens {
            match reference(token) {
                (Some(url), _) => prop_assert!(urls.insert(url), "duplicate url ref: {token}"),
                (_, Some(id)) => prop_assert!(ids.insert(id), "duplicate id ref: {token}"),
                _ => unreachable!("every token has a reference"),
            }
        }
    }

    /// A removal never coexists with a verification of the same
    /// reference, and no token ever references a blank url.
    #[test]
    fn removals_supersede_verifications(
        original in collection_strategy(),
        current in collection_strategy(),
        requests in request_strategy(),
    ) {
        let _init_guard = zdir_test::init();

        let tokens = recompute(&original, &current, &requests);

        for token in &tokens {
            if let (Some(url), _) = reference(token) {
                prop_assert!(!url.trim().is_empty(), "blank url in {token}");
            }
            if let LinkToken::VerifyExisting(id) = token {
                prop_assert!(
                    !tokens.contains(&LinkToken::Remove(LinkRef::Id(*id))),
                    "removal and verification of id {id}",
                );
            }
            if let LinkToken::VerifyNew(url) = token {
                prop_assert!(
                    !tokens.contains(&LinkToken::Remove(LinkRef::Url(url.clone()))),
                    "removal and verification of url {url}",
                );
            }
        }
    }
}
