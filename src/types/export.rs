use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::category::Category;

/// Export document version written by this crate.
pub const CURRENT_VERSION: u32 = 1;

/// Export/import envelope holding both lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkData {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<Category>,
}

/// How an imported document is reconciled with local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Keep local data, append incoming records that do not collide.
    Merge,
    /// Discard local data, keep the incoming lists verbatim.
    Replace,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merge" => Ok(ImportMode::Merge),
            "replace" => Ok(ImportMode::Replace),
            other => Err(format!("unknown import mode: {}", other)),
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Merge => write!(f, "merge"),
            ImportMode::Replace => write!(f, "replace"),
        }
    }
}

/// Outcome of an import. Expected failures are reported here, never as `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub bookmarks_imported: usize,
    pub categories_imported: usize,
    pub errors: Vec<String>,
}

impl ImportResult {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            errors: vec![message],
            ..Self::default()
        }
    }
}
