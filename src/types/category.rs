use serde::{Deserialize, Serialize};

use super::lenient::{number_as_i64, string_or_null};

/// A colored group of bookmarks, displayed in `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub color: String,
    #[serde(default, deserialize_with = "number_as_i64")]
    pub order: i64,
    #[serde(default, deserialize_with = "number_as_i64")]
    pub created_at: i64,
}

/// Partial update for a category. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl CategoryPatch {
    /// Applies the set fields of this patch to `category`.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(order) = self.order {
            category.order = order;
        }
    }
}

/// A category annotated with the number of bookmarks referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub count: usize,
}
