//! Client application facade
//!
//! Wires storage, session state, and the API client together and owns
//! the login/logout flows that mutate the session.

use std::fs;

use bookshelf_api::ApiClient;
use bookshelf_session::{SessionStore, UserSession};
use bookshelf_storage::Database;

use crate::config::Config;
use crate::Result;

/// Central entry point for the bookshelf client.
///
/// Holds the one session store every component reads; the API client
/// shares it and picks up token changes on its next request.
pub struct Bookshelf {
    config: Config,
    session: SessionStore,
    client: ApiClient,
}

impl Bookshelf {
    pub fn new(config: Config) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                Database::open(path)?
            }
            None => Database::open_in_memory()?,
        };

        let session = SessionStore::open(db);
        let client = ApiClient::new(&config.base_url, &config.google_books_url, session.clone())?;

        tracing::info!(base_url = %config.base_url, "Initialized bookshelf client");

        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Authenticate against the service and store the issued session
    /// wholesale.
    pub async fn login(&self, id: &str, password: &str) -> Result<UserSession> {
        let account = self.client.login(id, password).await?;
        let session = UserSession::new(account.id, account.name, account.role_name, account.token);
        self.session.set_session(session.clone());
        Ok(session)
    }

    /// Forget the stored session. Local only; the server keeps no
    /// session state to tear down.
    pub fn logout(&self) {
        self.session.clear_session();
    }
}
