//! Unit tests for the RPC handler: JSON-RPC methods dispatched by `handle_method`.
//!
//! These tests exercise the methods through the same code path used by the
//! `bookmark-keeper-rpc` binary, using a temporary on-disk SQLite store.

use std::sync::Mutex;

use serde_json::{json, Value};
use tempfile::TempDir;

use bookmark_keeper::app::App;
use bookmark_keeper::rpc_handler::handle_method;
use bookmark_keeper::services::settings_engine::SettingsEngine;

/// Create a fresh App backed by a temp directory store and settings file.
fn setup() -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let settings_path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let settings = SettingsEngine::new(Some(settings_path));
    let app = App::open(&tmp.path().join("data").join("test.db"), settings)
        .expect("Failed to init App");
    (Mutex::new(app), tmp)
}

fn call(app: &Mutex<App>, method: &str, params: Value) -> Value {
    handle_method(app, method, &params)
        .unwrap_or_else(|e| panic!("{} failed: {}", method, e))
}

#[test]
fn test_ping() {
    let (app, _tmp) = setup();
    assert_eq!(call(&app, "ping", json!({})), json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().contains("unknown method"));
}

#[test]
fn test_bookmark_add_get_and_search() {
    let (app, _tmp) = setup();
    let bm = call(
        &app,
        "bookmark.add",
        json!({"url": "https://a.com", "title": "A", "favicon": ""}),
    );
    let id = bm["id"].as_str().unwrap().to_string();
    assert_eq!(bm["categoryId"], Value::Null);

    let fetched = call(&app, "bookmark.get", json!({"id": id}));
    assert_eq!(fetched, bm);

    let found = call(&app, "bookmark.search", json!({"query": "A.COM"}));
    assert_eq!(found.as_array().unwrap().len(), 1);

    let by_url = call(&app, "bookmark.find_by_url", json!({"url": "https://a.com"}));
    assert_eq!(by_url["id"], bm["id"]);
}

#[test]
fn test_bookmark_add_missing_params() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "bookmark.add", &json!({"url": "https://a.com"}));
    assert!(res.unwrap_err().contains("invalid params"));
}

#[test]
fn test_missing_records_are_null_or_false() {
    let (app, _tmp) = setup();
    assert_eq!(call(&app, "bookmark.get", json!({"id": "bm_x"})), Value::Null);
    assert_eq!(
        call(&app, "bookmark.update", json!({"id": "bm_x", "title": "T"})),
        Value::Null
    );
    assert_eq!(
        call(&app, "bookmark.delete", json!({"id": "bm_x"})),
        json!({"deleted": false})
    );
    assert_eq!(
        call(&app, "category.delete", json!({"id": "cat_x"})),
        json!({"deleted": false})
    );
}

#[test]
fn test_category_flow_with_counts() {
    let (app, _tmp) = setup();
    let work = call(&app, "category.add", json!({"name": "Work", "color": "#10B981"}));
    let home = call(&app, "category.add", json!({"name": "Home"}));
    let work_id = work["id"].as_str().unwrap();
    let home_id = home["id"].as_str().unwrap();

    let bm = call(&app, "bookmark.add", json!({"url": "https://a.com", "title": "A"}));
    let moved = call(
        &app,
        "bookmark.move",
        json!({"id": bm["id"], "categoryId": work_id}),
    );
    assert_eq!(moved, json!({"moved": true}));
    assert_eq!(call(&app, "category.count", json!({"id": work_id})), json!({"count": 1}));

    call(&app, "category.reorder", json!({"ids": [home_id, work_id]}));
    let listed = call(&app, "category.list_with_count", json!({}));
    assert_eq!(listed[0]["name"], "Home");
    assert_eq!(listed[1]["name"], "Work");
    assert_eq!(listed[1]["count"], 1);
    assert_eq!(listed[1]["order"], 1);

    call(&app, "category.delete", json!({"id": work_id}));
    let uncategorized = call(&app, "bookmark.list_by_category", json!({"categoryId": null}));
    assert_eq!(uncategorized.as_array().unwrap().len(), 1);
}

#[test]
fn test_category_reorder_requires_string_ids() {
    let (app, _tmp) = setup();
    assert!(handle_method(&app, "category.reorder", &json!({})).is_err());
    assert!(handle_method(&app, "category.reorder", &json!({"ids": [1, 2]})).is_err());
}

#[test]
fn test_export_then_import_replace() {
    let (app, _tmp) = setup();
    call(&app, "bookmark.add", json!({"url": "https://a.com", "title": "A"}));
    let exported = call(&app, "data.export", json!({}));
    let text = exported["json"].as_str().unwrap().to_string();

    assert_eq!(call(&app, "data.validate", json!({"json": text})), json!({"valid": true}));
    assert_eq!(
        call(&app, "data.validate", json!({"json": "{nope"})),
        json!({"valid": false})
    );

    call(&app, "bookmark.add", json!({"url": "https://b.com", "title": "B"}));
    let result = call(&app, "data.import", json!({"json": text, "mode": "replace"}));
    assert_eq!(result["success"], true);
    assert_eq!(result["bookmarksImported"], 1);
    assert_eq!(call(&app, "bookmark.list", json!({})).as_array().unwrap().len(), 1);
}

#[test]
fn test_import_rejects_unknown_mode() {
    let (app, _tmp) = setup();
    let res = handle_method(
        &app,
        "data.import",
        &json!({"json": "{\"bookmarks\":[],\"categories\":[]}", "mode": "upsert"}),
    );
    assert!(res.unwrap_err().contains("unknown import mode"));
}

#[test]
fn test_import_failure_is_a_result_not_an_error() {
    let (app, _tmp) = setup();
    let result = call(&app, "data.import", json!({"json": "{not json", "mode": "merge"}));
    assert_eq!(result["success"], false);
    assert_eq!(result["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_export_file_into_given_dir() {
    let (app, tmp) = setup();
    let dir = tmp.path().join("exports");
    let res = call(
        &app,
        "data.export_file",
        json!({"dir": dir.to_string_lossy(), "filename": "out.json"}),
    );
    assert_eq!(res["path"], dir.join("out.json").to_string_lossy().to_string());
    assert!(dir.join("out.json").exists());
}

#[test]
fn test_settings_roundtrip() {
    let (app, _tmp) = setup();
    call(&app, "settings.set", json!({"key": "export.pretty", "value": false}));
    assert_eq!(call(&app, "settings.get", json!({}))["export"]["pretty"], false);

    let exported = call(&app, "data.export", json!({}));
    assert!(!exported["json"].as_str().unwrap().contains('\n'));

    call(&app, "settings.reset", json!({}));
    assert_eq!(call(&app, "settings.get", json!({}))["export"]["pretty"], true);
}

#[test]
fn test_app_new_opens_store_from_settings() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("settings.json");
    let db_path = tmp.path().join("nested").join("keeper.db");
    std::fs::write(
        &settings_path,
        json!({"storage": {"database_path": db_path.to_string_lossy()}}).to_string(),
    )
    .unwrap();

    let settings = SettingsEngine::new(Some(settings_path.to_string_lossy().to_string()));
    let app = Mutex::new(App::new(settings).expect("Failed to init App"));
    call(&app, "category.add", json!({"name": "Work"}));

    assert!(db_path.exists());
}

#[test]
fn test_in_memory_app_serves_requests() {
    let app = Mutex::new(App::in_memory(SettingsEngine::new(Some(
        "/nonexistent/settings.json".to_string(),
    ))));
    call(&app, "bookmark.add", json!({"url": "https://a.com", "title": "A"}));
    assert_eq!(call(&app, "bookmark.list", json!({})).as_array().unwrap().len(), 1);
}
