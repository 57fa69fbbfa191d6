use std::fmt;

// === StoreError ===

/// Errors raised by a key-value store backend.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying database rejected a read or write.
    Database(String),
    /// A stored value could not be converted to or from JSON.
    Serialization(String),
    /// The store's internal lock was poisoned by a panicking writer.
    LockPoisoned(String),
    /// The store rejected a write for a backend-specific reason.
    WriteRejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "Store database error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Store serialization error: {}", msg),
            StoreError::LockPoisoned(msg) => write!(f, "Store lock poisoned: {}", msg),
            StoreError::WriteRejected(msg) => write!(f, "Store write rejected: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

// === ExportError ===

/// Errors related to producing an export document.
#[derive(Debug)]
pub enum ExportError {
    /// Reading the current lists from the store failed.
    Store(StoreError),
    /// The export document could not be serialized.
    Serialization(String),
    /// Writing the export file failed.
    Io(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Store(e) => write!(f, "Export store error: {}", e),
            ExportError::Serialization(msg) => write!(f, "Export serialization error: {}", msg),
            ExportError::Io(msg) => write!(f, "Export I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ExportError {
    fn from(e: StoreError) -> Self {
        ExportError::Store(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
