// Bookmark Keeper services
// Cross-list operations and application configuration.

pub mod export_service;
pub mod settings_engine;
