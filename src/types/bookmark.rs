use serde::{Deserialize, Serialize};

use super::lenient::{number_as_i64, string_or_null};

/// Represents a saved bookmark.
///
/// Fields beyond `id`, `url` and `title` fall back to defaults when absent or
/// `null`, and timestamps accept any JSON number, so that loosely shaped
/// import documents still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub favicon: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "number_as_i64")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "number_as_i64")]
    pub updated_at: i64,
}

/// Caller-supplied fields for a new bookmark. The manager assigns
/// `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// Partial update for a bookmark. `None` leaves the field untouched.
///
/// `category_id` is doubly optional: `Some(None)` moves the bookmark to
/// uncategorized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPatch {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<String>>,
}

impl BookmarkPatch {
    /// Applies the set fields of this patch to `bookmark`.
    pub fn apply_to(&self, bookmark: &mut Bookmark) {
        if let Some(url) = &self.url {
            bookmark.url = url.clone();
        }
        if let Some(title) = &self.title {
            bookmark.title = title.clone();
        }
        if let Some(favicon) = &self.favicon {
            bookmark.favicon = favicon.clone();
        }
        if let Some(category_id) = &self.category_id {
            bookmark.category_id = category_id.clone();
        }
    }
}

/// Distinguishes an explicit `null` from an absent key.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
