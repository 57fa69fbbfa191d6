//! Export/import reconciliation for the bookmark and category lists.
//!
//! Export wraps both lists in a versioned [`BookmarkData`] document. Import
//! parses raw JSON, checks its shape with [`is_valid_document`], then either
//! replaces local state or merges into it. Import never returns `Err`: every
//! failure is reported through [`ImportResult::errors`].
//!
//! Writes are not transactional. If the store fails between the two list
//! writes of an import, the first write stays committed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::store::{KeyValueStore, Storage};
use crate::types::bookmark::Bookmark;
use crate::types::category::Category;
use crate::types::errors::{ExportError, StoreError};
use crate::types::export::{BookmarkData, ImportMode, ImportResult, CURRENT_VERSION};

/// Trait defining the export/import interface.
pub trait ExportServiceTrait {
    fn export_data(&self) -> Result<BookmarkData, ExportError>;
    fn export_to_json(&self) -> Result<String, ExportError>;
    fn export_to_file(&self, dir: &Path, filename: Option<&str>) -> Result<PathBuf, ExportError>;
    fn import_from_json(&self, raw: &str, mode: ImportMode) -> ImportResult;
}

/// Lists read from an import document once it has passed the shape check.
/// `version` is kept untyped: any value is accepted.
#[derive(Deserialize)]
struct IncomingLists {
    #[serde(default)]
    version: Value,
    bookmarks: Vec<Bookmark>,
    categories: Vec<Category>,
}

/// Export/import service backed by an injected store.
pub struct ExportService<'a> {
    storage: Storage<'a>,
    pretty: bool,
}

impl<'a> ExportService<'a> {
    /// Creates an `ExportService` that pretty-prints its output.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            storage: Storage::new(store),
            pretty: true,
        }
    }

    /// Toggles pretty-printing of exported JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn replace(&self, incoming: IncomingLists) -> Result<(usize, usize), StoreError> {
        self.storage.set_bookmarks(&incoming.bookmarks)?;
        self.storage.set_categories(&incoming.categories)?;
        Ok((incoming.bookmarks.len(), incoming.categories.len()))
    }

    /// Appends incoming categories with an unseen `name` and incoming
    /// bookmarks with an unseen `url`. Category `order` is not renumbered.
    fn merge(&self, incoming: IncomingLists) -> Result<(usize, usize), StoreError> {
        let mut categories = self.storage.categories()?;
        let mut bookmarks = self.storage.bookmarks()?;

        let new_categories: Vec<Category> = {
            let existing_names: HashSet<&str> =
                categories.iter().map(|c| c.name.as_str()).collect();
            incoming
                .categories
                .into_iter()
                .filter(|c| !existing_names.contains(c.name.as_str()))
                .collect()
        };

        let new_bookmarks: Vec<Bookmark> = {
            let existing_urls: HashSet<&str> = bookmarks.iter().map(|b| b.url.as_str()).collect();
            incoming
                .bookmarks
                .into_iter()
                .filter(|b| !existing_urls.contains(b.url.as_str()))
                .collect()
        };

        let counts = (new_bookmarks.len(), new_categories.len());
        categories.extend(new_categories);
        bookmarks.extend(new_bookmarks);

        self.storage.set_categories(&categories)?;
        self.storage.set_bookmarks(&bookmarks)?;
        Ok(counts)
    }
}

impl<'a> ExportServiceTrait for ExportService<'a> {
    /// Snapshots both lists into a version-1 document stamped with the current time.
    fn export_data(&self) -> Result<BookmarkData, ExportError> {
        Ok(BookmarkData {
            version: CURRENT_VERSION,
            exported_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            bookmarks: self.storage.bookmarks()?,
            categories: self.storage.categories()?,
        })
    }

    fn export_to_json(&self) -> Result<String, ExportError> {
        let data = self.export_data()?;
        let json = if self.pretty {
            serde_json::to_string_pretty(&data)
        } else {
            serde_json::to_string(&data)
        };
        json.map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Writes the export to `dir`, named `filename` or `bookmarks-<YYYY-MM-DD>.json`.
    ///
    /// Creates `dir` if it doesn't exist. Returns the written path.
    fn export_to_file(&self, dir: &Path, filename: Option<&str>) -> Result<PathBuf, ExportError> {
        let json = self.export_to_json()?;
        let name = match filename {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_export_filename(Utc::now()),
        };

        fs::create_dir_all(dir)
            .map_err(|e| ExportError::Io(format!("Failed to create export directory: {}", e)))?;
        let path = dir.join(name);
        fs::write(&path, json)
            .map_err(|e| ExportError::Io(format!("Failed to write export file: {}", e)))?;

        info!(path = %path.display(), "bookmarks exported");
        Ok(path)
    }

    /// Parses, validates and reconciles `raw` with local state.
    fn import_from_json(&self, raw: &str, mode: ImportMode) -> ImportResult {
        let doc: Value = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "import rejected: invalid JSON");
                return ImportResult::failed(format!("Invalid JSON format: {}", e));
            }
        };

        if !is_valid_document(&doc) {
            warn!("import rejected: unexpected document structure");
            return ImportResult::failed(
                "JSON structure does not match the expected format".to_string(),
            );
        }

        let incoming: IncomingLists = match serde_json::from_value(doc) {
            Ok(incoming) => incoming,
            Err(e) => {
                warn!(error = %e, "import rejected: field type mismatch");
                return ImportResult::failed(format!(
                    "Unsupported field value in import document: {}",
                    e
                ));
            }
        };

        if incoming.version != Value::from(CURRENT_VERSION) {
            warn!(version = %incoming.version, "importing document with unexpected version");
        }

        let outcome = match mode {
            ImportMode::Replace => self.replace(incoming),
            ImportMode::Merge => self.merge(incoming),
        };

        match outcome {
            Ok((bookmarks_imported, categories_imported)) => {
                info!(%mode, bookmarks_imported, categories_imported, "import completed");
                ImportResult {
                    success: true,
                    bookmarks_imported,
                    categories_imported,
                    errors: Vec::new(),
                }
            }
            Err(e) => {
                warn!(%mode, error = %e, "import failed while writing");
                ImportResult::failed(format!("Import failed: {}", e))
            }
        }
    }
}

/// Returns `bookmarks-<YYYY-MM-DD>.json` for the UTC date of `now`.
pub fn default_export_filename(now: DateTime<Utc>) -> String {
    format!("bookmarks-{}.json", now.format("%Y-%m-%d"))
}

/// Structural check for an import document.
///
/// Passes iff `doc` is an object whose `bookmarks` and `categories` are
/// arrays, every bookmark is an object with string `id`, `url` and `title`,
/// and every category is an object with string `id` and `name`. No other
/// field is inspected.
pub fn is_valid_document(doc: &Value) -> bool {
    let Some(obj) = doc.as_object() else {
        return false;
    };
    let (Some(bookmarks), Some(categories)) = (
        obj.get("bookmarks").and_then(Value::as_array),
        obj.get("categories").and_then(Value::as_array),
    ) else {
        return false;
    };

    bookmarks
        .iter()
        .all(|b| has_string_fields(b, &["id", "url", "title"]))
        && categories
            .iter()
            .all(|c| has_string_fields(c, &["id", "name"]))
}

fn has_string_fields(value: &Value, fields: &[&str]) -> bool {
    match value.as_object() {
        Some(obj) => fields
            .iter()
            .all(|field| obj.get(*field).is_some_and(Value::is_string)),
        None => false,
    }
}
