//! RPC method handler for the Bookmark Keeper JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method name and its params to the
//! repositories and services of an [`App`].

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::managers::category_manager::CategoryManagerTrait;
use crate::services::export_service::{is_valid_document, ExportServiceTrait};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::{BookmarkPatch, NewBookmark};
use crate::types::category::CategoryPatch;
use crate::types::export::ImportMode;

fn str_param<'p>(params: &'p Value, name: &str) -> Result<&'p str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn opt_str_param<'p>(params: &'p Value, name: &str) -> Option<&'p str> {
    params.get(name).and_then(|v| v.as_str())
}

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Missing records are `null`/`false` results, not errors.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.add" => {
            let input: NewBookmark =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))?;
            let bm = a.bookmarks().add_bookmark(input).map_err(|e| e.to_string())?;
            to_json(bm)
        }
        "bookmark.update" => {
            let id = str_param(params, "id")?;
            let patch: BookmarkPatch =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))?;
            let bm = a.bookmarks().update_bookmark(id, &patch).map_err(|e| e.to_string())?;
            to_json(bm)
        }
        "bookmark.delete" => {
            let id = str_param(params, "id")?;
            let deleted = a.bookmarks().delete_bookmark(id).map_err(|e| e.to_string())?;
            Ok(json!({"deleted": deleted}))
        }
        "bookmark.get" => {
            let id = str_param(params, "id")?;
            to_json(a.bookmarks().get_bookmark_by_id(id).map_err(|e| e.to_string())?)
        }
        "bookmark.find_by_url" => {
            let url = str_param(params, "url")?;
            to_json(a.bookmarks().get_bookmark_by_url(url).map_err(|e| e.to_string())?)
        }
        "bookmark.move" => {
            let id = str_param(params, "id")?;
            let category_id = opt_str_param(params, "categoryId");
            let moved = a
                .bookmarks()
                .move_bookmark(id, category_id)
                .map_err(|e| e.to_string())?;
            Ok(json!({"moved": moved}))
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            to_json(a.bookmarks().search_bookmarks(query).map_err(|e| e.to_string())?)
        }
        "bookmark.list" => to_json(a.bookmarks().list_bookmarks().map_err(|e| e.to_string())?),
        "bookmark.list_by_category" => {
            let category_id = opt_str_param(params, "categoryId");
            to_json(
                a.bookmarks()
                    .list_by_category(category_id)
                    .map_err(|e| e.to_string())?,
            )
        }

        // ─── Categories ───
        "category.add" => {
            let name = str_param(params, "name")?;
            let color = opt_str_param(params, "color");
            to_json(a.categories().add_category(name, color).map_err(|e| e.to_string())?)
        }
        "category.update" => {
            let id = str_param(params, "id")?;
            let patch: CategoryPatch =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))?;
            to_json(a.categories().update_category(id, &patch).map_err(|e| e.to_string())?)
        }
        "category.delete" => {
            let id = str_param(params, "id")?;
            let deleted = a.categories().delete_category(id).map_err(|e| e.to_string())?;
            Ok(json!({"deleted": deleted}))
        }
        "category.reorder" => {
            let ids: Vec<String> = params
                .get("ids")
                .cloned()
                .ok_or("missing ids")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "ids must be an array of strings"))?;
            a.categories().reorder_categories(&ids).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "category.list" => to_json(a.categories().list_categories().map_err(|e| e.to_string())?),
        "category.get" => {
            let id = str_param(params, "id")?;
            to_json(a.categories().get_category_by_id(id).map_err(|e| e.to_string())?)
        }
        "category.count" => {
            let id = str_param(params, "id")?;
            let count = a.categories().bookmark_count(id).map_err(|e| e.to_string())?;
            Ok(json!({"count": count}))
        }
        "category.list_with_count" => {
            to_json(a.categories().list_with_count().map_err(|e| e.to_string())?)
        }

        // ─── Export / Import ───
        "data.export" => {
            let json = a.exporter().export_to_json().map_err(|e| e.to_string())?;
            Ok(json!({"json": json}))
        }
        "data.export_file" => {
            let dir = match opt_str_param(params, "dir") {
                Some(d) => PathBuf::from(d),
                None => a.settings_engine.export_dir(),
            };
            let filename = opt_str_param(params, "filename");
            let path = a
                .exporter()
                .export_to_file(&dir, filename)
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "data.import" => {
            let raw = str_param(params, "json")?;
            let mode: ImportMode = str_param(params, "mode")?.parse()?;
            to_json(a.exporter().import_from_json(raw, mode))
        }
        "data.validate" => {
            let raw = str_param(params, "json")?;
            let valid = serde_json::from_str::<Value>(raw)
                .map(|doc| is_valid_document(&doc))
                .unwrap_or(false);
            Ok(json!({"valid": valid}))
        }

        // ─── Settings ───
        "settings.get" => to_json(a.settings_engine.get_settings()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
