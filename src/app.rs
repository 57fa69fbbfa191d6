//! App Core for Bookmark Keeper.
//!
//! Holds the opened store and settings. Repositories and the export service
//! borrow the store and are created on demand.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::managers::bookmark_manager::BookmarkManager;
use crate::managers::category_manager::CategoryManager;
use crate::services::export_service::ExportService;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};

/// Central application struct.
pub struct App {
    pub store: Arc<dyn KeyValueStore>,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Loads settings and opens the SQLite store they point to.
    pub fn new(mut settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        settings_engine.load()?;
        let db_path = settings_engine.database_path();
        Self::open(&db_path, settings_engine)
    }

    /// Opens the SQLite store at `db_path`, creating parent directories.
    pub fn open(db_path: &Path, settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = SqliteStore::open(db_path)?;
        info!(path = %db_path.display(), "app initialized");
        Ok(Self::with_store(Arc::new(store), settings_engine))
    }

    /// App over a fresh in-memory store, with settings at their defaults.
    pub fn in_memory(settings_engine: SettingsEngine) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), settings_engine)
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>, settings_engine: SettingsEngine) -> Self {
        Self {
            store,
            settings_engine,
        }
    }

    pub fn bookmarks(&self) -> BookmarkManager<'_> {
        BookmarkManager::new(self.store.as_ref())
    }

    pub fn categories(&self) -> CategoryManager<'_> {
        CategoryManager::new(self.store.as_ref())
    }

    /// Export service honoring the `export.pretty` setting.
    pub fn exporter(&self) -> ExportService<'_> {
        ExportService::new(self.store.as_ref())
            .with_pretty(self.settings_engine.get_settings().export.pretty)
    }
}
