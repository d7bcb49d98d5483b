//! REST endpoint catalog
//!
//! A fixed mapping of named operations to absolute URLs, validated once
//! at construction. Paths follow the bookshelf service contract.

use url::Url;

use crate::Result;

/// Rows per page in list and search results.
pub const PAGE_SIZE: usize = 10;

/// Default root of the bookshelf REST service.
pub const DEFAULT_BASE_URL: &str = "https://satouxr.click/dev/bookshelf/webresources/";

/// Default root of the external book-metadata search API.
pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub user_login: Url,
    pub user_change_password: Url,
    pub user_get_list: Url,
    pub user_regist: Url,
    pub user_delete: Url,
    pub user_reset_password: Url,
    pub genre_get_list: Url,
    pub book_regist: Url,
    pub book_search: Url,
    pub book_download: Url,
    pub book_delete: Url,
    google_books: Url,
}

impl Endpoints {
    pub fn new(base_url: &str, google_books_url: &str) -> Result<Self> {
        // Url::join treats a base without a trailing slash as a file and
        // would drop its last path segment
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        Ok(Self {
            user_login: base.join("user/login/")?,
            user_change_password: base.join("user/changePassword/")?,
            user_get_list: base.join("user/getList/")?,
            user_regist: base.join("user/regist/")?,
            user_delete: base.join("user/delete/")?,
            user_reset_password: base.join("user/resetPassword/")?,
            genre_get_list: base.join("genre/getList/")?,
            book_regist: base.join("book/regist/")?,
            book_search: base.join("book/search/")?,
            book_download: base.join("book/download/")?,
            book_delete: base.join("book/delete/")?,
            google_books: Url::parse(google_books_url)?,
        })
    }

    /// Metadata search URL for a free-text query.
    pub fn google_search(&self, query: &str) -> Url {
        let mut url = self.google_books.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}
