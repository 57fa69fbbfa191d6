//! Bookmark Manager.
//!
//! Implements `BookmarkManagerTrait` over the bookmark list of a
//! [`KeyValueStore`]. Every operation reads the whole list, mutates it in
//! memory and writes the whole list back.

use tracing::debug;

use crate::store::{KeyValueStore, Storage};
use crate::types::bookmark::{Bookmark, BookmarkPatch, NewBookmark};
use crate::types::errors::StoreError;

use super::{generate_id, now_millis};

/// Trait defining bookmark management operations.
///
/// Missing ids are reported as `None`/`false`; `Err` is reserved for store failures.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&self, input: NewBookmark) -> Result<Bookmark, StoreError>;
    fn update_bookmark(&self, id: &str, patch: &BookmarkPatch) -> Result<Option<Bookmark>, StoreError>;
    fn delete_bookmark(&self, id: &str) -> Result<bool, StoreError>;
    fn get_bookmark_by_url(&self, url: &str) -> Result<Option<Bookmark>, StoreError>;
    fn get_bookmark_by_id(&self, id: &str) -> Result<Option<Bookmark>, StoreError>;
    fn move_bookmark(&self, id: &str, category_id: Option<&str>) -> Result<bool, StoreError>;
    fn search_bookmarks(&self, query: &str) -> Result<Vec<Bookmark>, StoreError>;
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError>;
    fn list_by_category(&self, category_id: Option<&str>) -> Result<Vec<Bookmark>, StoreError>;
}

/// Bookmark manager backed by an injected store.
pub struct BookmarkManager<'a> {
    storage: Storage<'a>,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` over the provided store.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            storage: Storage::new(store),
        }
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Adds a new bookmark and returns the stored record.
    fn add_bookmark(&self, input: NewBookmark) -> Result<Bookmark, StoreError> {
        let mut bookmarks = self.storage.bookmarks()?;
        let now = now_millis();
        let bookmark = Bookmark {
            id: generate_id("bm"),
            url: input.url,
            title: input.title,
            favicon: input.favicon,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        };
        bookmarks.push(bookmark.clone());
        self.storage.set_bookmarks(&bookmarks)?;
        debug!(id = %bookmark.id, url = %bookmark.url, "bookmark added");
        Ok(bookmark)
    }

    /// Merges `patch` over an existing bookmark and refreshes `updated_at`.
    fn update_bookmark(&self, id: &str, patch: &BookmarkPatch) -> Result<Option<Bookmark>, StoreError> {
        let mut bookmarks = self.storage.bookmarks()?;
        let Some(bookmark) = bookmarks.iter_mut().find(|b| b.id == id) else {
            debug!(id, "update skipped, bookmark not found");
            return Ok(None);
        };

        patch.apply_to(bookmark);
        bookmark.updated_at = now_millis();
        let updated = bookmark.clone();

        self.storage.set_bookmarks(&bookmarks)?;
        debug!(id, "bookmark updated");
        Ok(Some(updated))
    }

    /// Removes a bookmark by ID. Returns `false` if it did not exist.
    fn delete_bookmark(&self, id: &str) -> Result<bool, StoreError> {
        let mut bookmarks = self.storage.bookmarks()?;
        let Some(index) = bookmarks.iter().position(|b| b.id == id) else {
            return Ok(false);
        };

        bookmarks.remove(index);
        self.storage.set_bookmarks(&bookmarks)?;
        debug!(id, "bookmark deleted");
        Ok(true)
    }

    /// Exact, case-sensitive URL lookup.
    fn get_bookmark_by_url(&self, url: &str) -> Result<Option<Bookmark>, StoreError> {
        let bookmarks = self.storage.bookmarks()?;
        Ok(bookmarks.into_iter().find(|b| b.url == url))
    }

    fn get_bookmark_by_id(&self, id: &str) -> Result<Option<Bookmark>, StoreError> {
        let bookmarks = self.storage.bookmarks()?;
        Ok(bookmarks.into_iter().find(|b| b.id == id))
    }

    /// Moves a bookmark to a category (or to uncategorized if `category_id` is `None`).
    ///
    /// The category id is not checked against the category list.
    fn move_bookmark(&self, id: &str, category_id: Option<&str>) -> Result<bool, StoreError> {
        let patch = BookmarkPatch {
            category_id: Some(category_id.map(str::to_string)),
            ..BookmarkPatch::default()
        };
        Ok(self.update_bookmark(id, &patch)?.is_some())
    }

    /// Case-insensitive substring search over title and URL.
    ///
    /// A blank query returns every bookmark.
    fn search_bookmarks(&self, query: &str) -> Result<Vec<Bookmark>, StoreError> {
        let bookmarks = self.storage.bookmarks()?;
        if query.trim().is_empty() {
            return Ok(bookmarks);
        }

        let needle = query.to_lowercase();
        Ok(bookmarks
            .into_iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle) || b.url.to_lowercase().contains(&needle)
            })
            .collect())
    }

    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        self.storage.bookmarks()
    }

    /// Lists bookmarks in a category (or uncategorized ones if `category_id` is `None`).
    fn list_by_category(&self, category_id: Option<&str>) -> Result<Vec<Bookmark>, StoreError> {
        let bookmarks = self.storage.bookmarks()?;
        Ok(bookmarks
            .into_iter()
            .filter(|b| b.category_id.as_deref() == category_id)
            .collect())
    }
}
