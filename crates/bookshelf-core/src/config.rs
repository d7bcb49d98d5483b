//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use bookshelf_api::{DEFAULT_BASE_URL, DEFAULT_GOOGLE_BOOKS_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the bookshelf REST service
    pub base_url: String,
    /// Root URL of the external book-metadata search API
    pub google_books_url: String,
    /// Path to the session database. `None` keeps session state in
    /// memory for the lifetime of the process only.
    pub database_path: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            google_books_url: DEFAULT_GOOGLE_BOOKS_URL.to_string(),
            database_path: None,
        }
    }

    /// Keep session state in a database file under `data_dir`, so it
    /// outlives the process.
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.database_path = Some(data_dir.join("bookshelf.db"));
        self
    }

    /// Platform-appropriate data directory for durable client state.
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("bookshelf"))
            .unwrap_or_else(|| PathBuf::from(".bookshelf"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// Simple dirs implementation for the local data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
