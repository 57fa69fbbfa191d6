//! Bookmark Keeper: bookmarks organized into colored categories, with
//! versioned JSON export and merge/replace import.
//!
//! This library crate exposes all modules for use by the RPC binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod store;
pub mod types;
