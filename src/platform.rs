// Bookmark Keeper platform paths
//
// Linux:   $XDG_CONFIG_HOME/bookmark-keeper, $XDG_DATA_HOME/bookmark-keeper
// macOS:   ~/Library/Application Support/BookmarkKeeper
// Windows: %APPDATA%/BookmarkKeeper

use std::env;
use std::path::PathBuf;

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for Bookmark Keeper.
#[cfg(target_os = "linux")]
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("bookmark-keeper"),
        Err(_) => home_dir().join(".config").join("bookmark-keeper"),
    }
}

/// Returns the data directory for Bookmark Keeper.
#[cfg(target_os = "linux")]
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("bookmark-keeper"),
        Err(_) => home_dir()
            .join(".local")
            .join("share")
            .join("bookmark-keeper"),
    }
}

#[cfg(target_os = "macos")]
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("BookmarkKeeper")
}

#[cfg(target_os = "macos")]
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

#[cfg(target_os = "windows")]
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("BookmarkKeeper")
}

#[cfg(target_os = "windows")]
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn get_config_dir() -> PathBuf {
    home_dir().join(".bookmark-keeper")
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

/// Default SQLite file inside the data directory.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("bookmarks.db")
}
