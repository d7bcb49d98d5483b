//! Bookshelf service REST client
//!
//! The endpoint catalog, the wire-contract types, and an HTTP client
//! that reads the session's bearer token at request time and injects it
//! into every service request.

mod client;
mod endpoints;
mod error;
mod google;
mod types;

pub use client::ApiClient;
pub use endpoints::{Endpoints, DEFAULT_BASE_URL, DEFAULT_GOOGLE_BOOKS_URL, PAGE_SIZE};
pub use error::ApiError;
pub use google::GoogleBook;
pub use types::{Book, BookForm, Genre, SearchCond, UserAccount};

pub type Result<T> = std::result::Result<T, ApiError>;
