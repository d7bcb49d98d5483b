//! Bookshelf client core
//!
//! Configuration and wiring for the client-side data-access layer: a
//! storage-backed session store plus the REST client that authenticates
//! with it.

mod bookshelf;
mod config;
mod error;

pub use bookshelf::Bookshelf;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use bookshelf_api::{
    ApiClient, ApiError, Book, BookForm, Endpoints, Genre, GoogleBook, SearchCond, UserAccount,
    PAGE_SIZE,
};
pub use bookshelf_session::{SessionStore, UserSession};
pub use bookshelf_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
