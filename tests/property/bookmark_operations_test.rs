//! Property-based tests for Bookmark Manager operations.
//!
//! Verifies that an added bookmark is always retrievable by id and by a
//! search on its own title, and that search never returns non-matching rows.

use bookmark_keeper::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use bookmark_keeper::store::MemoryStore;
use bookmark_keeper::types::bookmark::NewBookmark;
use proptest::prelude::*;

/// Strategy for generating valid URL strings.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,15}",
        prop_oneof![Just(".com"), Just(".org"), Just(".net"), Just(".io")],
        proptest::option::of("/[a-z0-9]{1,10}"),
    )
        .prop_map(|(scheme, host, tld, path)| {
            format!("{}://{}{}{}", scheme, host, tld, path.unwrap_or_default())
        })
}

/// Strategy for generating non-empty bookmark titles.
fn arb_title() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{1,30}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn bookmark_add_then_find_and_search(
        url in arb_url(),
        title in arb_title(),
    ) {
        let store = MemoryStore::new();
        let manager = BookmarkManager::new(&store);

        let added = manager
            .add_bookmark(NewBookmark {
                url: url.clone(),
                title: title.clone(),
                favicon: String::new(),
                category_id: None,
            })
            .expect("add_bookmark should succeed");

        let found = manager.get_bookmark_by_id(&added.id).unwrap();
        prop_assert_eq!(found.as_ref(), Some(&added));
        prop_assert_eq!(&added.url, &url);
        prop_assert_eq!(&added.title, &title);
        prop_assert_eq!(added.created_at, added.updated_at);

        let results = manager.search_bookmarks(&title.to_uppercase()).unwrap();
        prop_assert!(results.iter().any(|b| b.id == added.id));
    }

    #[test]
    fn search_results_always_match_query(
        entries in proptest::collection::vec((arb_url(), arb_title()), 1..12),
        query in "[a-z]{1,3}",
    ) {
        let store = MemoryStore::new();
        let manager = BookmarkManager::new(&store);
        for (url, title) in &entries {
            manager
                .add_bookmark(NewBookmark {
                    url: url.clone(),
                    title: title.clone(),
                    favicon: String::new(),
                    category_id: None,
                })
                .unwrap();
        }

        let results = manager.search_bookmarks(&query).unwrap();
        let expected = entries
            .iter()
            .filter(|(u, t)| u.to_lowercase().contains(&query) || t.to_lowercase().contains(&query))
            .count();
        prop_assert_eq!(results.len(), expected);
    }
}
