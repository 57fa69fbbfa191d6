//! Category Manager.
//!
//! Implements `CategoryManagerTrait` over the category list of a
//! [`KeyValueStore`]. Keeps `order` a dense `0..N-1` sequence across add,
//! delete and reorder, and detaches bookmarks before a category is removed.

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::store::{KeyValueStore, Storage};
use crate::types::category::{Category, CategoryPatch, CategoryWithCount};
use crate::types::errors::StoreError;

use super::{generate_id, now_millis};

/// Palette used when a category is created without an explicit color.
pub const DEFAULT_COLORS: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6",
    "#EC4899", "#06B6D4", "#84CC16", "#F97316", "#6366F1",
];

/// Trait defining category management operations.
pub trait CategoryManagerTrait {
    fn add_category(&self, name: &str, color: Option<&str>) -> Result<Category, StoreError>;
    fn update_category(&self, id: &str, patch: &CategoryPatch) -> Result<Option<Category>, StoreError>;
    fn delete_category(&self, id: &str) -> Result<bool, StoreError>;
    fn reorder_categories(&self, ordered_ids: &[String]) -> Result<(), StoreError>;
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>, StoreError>;
    fn bookmark_count(&self, category_id: &str) -> Result<usize, StoreError>;
    fn list_with_count(&self) -> Result<Vec<CategoryWithCount>, StoreError>;
}

/// Category manager backed by an injected store.
pub struct CategoryManager<'a> {
    storage: Storage<'a>,
}

impl<'a> CategoryManager<'a> {
    /// Creates a new `CategoryManager` over the provided store.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            storage: Storage::new(store),
        }
    }

    fn random_color() -> &'static str {
        DEFAULT_COLORS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(DEFAULT_COLORS[0])
    }
}

/// Rewrites `order` to each category's index in the slice.
fn renumber(categories: &mut [Category]) {
    for (index, category) in categories.iter_mut().enumerate() {
        category.order = index as i64;
    }
}

impl<'a> CategoryManagerTrait for CategoryManager<'a> {
    /// Appends a category. An empty or missing color picks one from [`DEFAULT_COLORS`].
    fn add_category(&self, name: &str, color: Option<&str>) -> Result<Category, StoreError> {
        let mut categories = self.storage.categories()?;
        let color = match color {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => Self::random_color().to_string(),
        };
        let category = Category {
            id: generate_id("cat"),
            name: name.to_string(),
            color,
            order: categories.len() as i64,
            created_at: now_millis(),
        };
        categories.push(category.clone());
        self.storage.set_categories(&categories)?;
        debug!(id = %category.id, name, "category added");
        Ok(category)
    }

    fn update_category(&self, id: &str, patch: &CategoryPatch) -> Result<Option<Category>, StoreError> {
        let mut categories = self.storage.categories()?;
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        patch.apply_to(category);
        let updated = category.clone();

        self.storage.set_categories(&categories)?;
        debug!(id, "category updated");
        Ok(Some(updated))
    }

    /// Deletes a category, moving its bookmarks to uncategorized first.
    ///
    /// The bookmark list is written before the category list, so a failure
    /// between the two writes leaves detached bookmarks and the category
    /// still present, never a dangling reference.
    fn delete_category(&self, id: &str) -> Result<bool, StoreError> {
        let mut categories = self.storage.categories()?;
        let Some(index) = categories.iter().position(|c| c.id == id) else {
            return Ok(false);
        };

        let mut bookmarks = self.storage.bookmarks()?;
        let now = now_millis();
        let mut detached = 0usize;
        for bookmark in bookmarks
            .iter_mut()
            .filter(|b| b.category_id.as_deref() == Some(id))
        {
            bookmark.category_id = None;
            bookmark.updated_at = now;
            detached += 1;
        }
        self.storage.set_bookmarks(&bookmarks)?;

        categories.remove(index);
        renumber(&mut categories);
        self.storage.set_categories(&categories)?;

        info!(id, detached, "category deleted");
        Ok(true)
    }

    /// Assigns `order` from the position of each id in `ordered_ids`.
    ///
    /// `ordered_ids` must name every category: stored categories missing from
    /// it are dropped from the list. Ids with no stored category are skipped.
    fn reorder_categories(&self, ordered_ids: &[String]) -> Result<(), StoreError> {
        let categories = self.storage.categories()?;
        let reordered: Vec<Category> = ordered_ids
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                categories.iter().find(|c| &c.id == id).map(|c| Category {
                    order: index as i64,
                    ..c.clone()
                })
            })
            .collect();

        let dropped = categories.len().saturating_sub(reordered.len());
        self.storage.set_categories(&reordered)?;
        debug!(count = reordered.len(), dropped, "categories reordered");
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.storage.categories()
    }

    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>, StoreError> {
        let categories = self.storage.categories()?;
        Ok(categories.into_iter().find(|c| c.id == id))
    }

    /// Number of bookmarks referencing `category_id`.
    fn bookmark_count(&self, category_id: &str) -> Result<usize, StoreError> {
        let bookmarks = self.storage.bookmarks()?;
        Ok(bookmarks
            .iter()
            .filter(|b| b.category_id.as_deref() == Some(category_id))
            .count())
    }

    /// All categories sorted by `order`, each with its bookmark count.
    fn list_with_count(&self) -> Result<Vec<CategoryWithCount>, StoreError> {
        let mut categories = self.storage.categories()?;
        let bookmarks = self.storage.bookmarks()?;
        categories.sort_by_key(|c| c.order);

        Ok(categories
            .into_iter()
            .map(|category| {
                let count = bookmarks
                    .iter()
                    .filter(|b| b.category_id.as_deref() == Some(category.id.as_str()))
                    .count();
                CategoryWithCount { category, count }
            })
            .collect())
    }
}
