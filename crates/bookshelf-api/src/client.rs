//! Authenticated HTTP client for the bookshelf service
//!
//! Every service request carries `Authorization: Bearer <token>` with
//! the token read from the session store at request time, so a client
//! built before login sends the fresh token on its next request without
//! being rebuilt. The external metadata API is never sent the token.

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use bookshelf_session::SessionStore;

use crate::endpoints::Endpoints;
use crate::error::ApiError;
use crate::google::{GoogleBook, VolumeList};
use crate::types::{Book, BookForm, Genre, SearchCond, UserAccount};
use crate::Result;

#[derive(Serialize)]
struct LoginRequest<'a> {
    id: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    id: &'a str,
    password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct UserIdRequest<'a> {
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBookRequest<'a> {
    user_id: &'a str,
    seq_no: i64,
}

/// HTTP client for the bookshelf service.
///
/// Cheap to clone; clones share the session store and the connection
/// pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, google_books_url: &str, session: SessionStore) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoints: Endpoints::new(base_url, google_books_url)?,
            session,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Current Authorization header value. With an empty token this is
    /// the literal `Bearer ` — an unauthenticated request through the
    /// authenticated client is the caller's mistake, not ours.
    fn bearer(&self) -> String {
        format!("Bearer {}", self.session.token())
    }

    async fn get_json<T>(&self, url: &Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url.clone())
            .header(AUTHORIZATION, self.bearer())
            .json(body)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// POST for operations whose response body carries nothing we use.
    async fn post_unit<B>(&self, url: &Url, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(url.clone())
            .header(AUTHORIZATION, self.bearer())
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Authenticate and receive the account with its issued token.
    ///
    /// Does not touch the session store; storing the session is the
    /// login flow's decision.
    pub async fn login(&self, id: &str, password: &str) -> Result<UserAccount> {
        tracing::debug!(user_id = %id, "Logging in");
        self.post_json(&self.endpoints.user_login, &LoginRequest { id, password })
            .await
    }

    pub async fn change_password(
        &self,
        id: &str,
        password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.post_unit(
            &self.endpoints.user_change_password,
            &ChangePasswordRequest {
                id,
                password,
                new_password,
            },
        )
        .await
    }

    pub async fn reset_password(&self, id: &str) -> Result<()> {
        self.post_unit(&self.endpoints.user_reset_password, &UserIdRequest { id })
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.get_json(&self.endpoints.user_get_list).await
    }

    pub async fn register_user(&self, user: &UserAccount) -> Result<()> {
        self.post_unit(&self.endpoints.user_regist, user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.post_unit(&self.endpoints.user_delete, &UserIdRequest { id })
            .await
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.get_json(&self.endpoints.genre_get_list).await
    }

    pub async fn register_book(&self, book: &BookForm) -> Result<()> {
        self.post_unit(&self.endpoints.book_regist, book).await
    }

    pub async fn search_books(&self, cond: &SearchCond) -> Result<Vec<Book>> {
        self.post_json(&self.endpoints.book_search, cond).await
    }

    /// Export the matching shelf rows; returns the raw file bytes.
    pub async fn download_books(&self, cond: &SearchCond) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(self.endpoints.book_download.clone())
            .header(AUTHORIZATION, self.bearer())
            .json(cond)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn delete_book(&self, user_id: &str, seq_no: i64) -> Result<()> {
        self.post_unit(&self.endpoints.book_delete, &DeleteBookRequest { user_id, seq_no })
            .await
    }

    /// Free-text search against the external metadata API.
    pub async fn search_google_books(&self, query: &str) -> Result<Vec<GoogleBook>> {
        let url = self.endpoints.google_search(query);
        let response = self.http.get(url).send().await?;
        let list: VolumeList = check_status(response).await?.json().await?;
        Ok(list.items.into_iter().map(GoogleBook::from).collect())
    }
}

/// Map non-2xx responses to `ApiError::Status`, keeping the body for
/// debugging.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), "Request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_session::UserSession;
    use bookshelf_storage::Database;

    fn logged_in_session(token: &str) -> SessionStore {
        let store = SessionStore::open(Database::open_in_memory().unwrap());
        store.set_session(UserSession::new(
            "u1".to_string(),
            "Alice".to_string(),
            "member".to_string(),
            token.to_string(),
        ));
        store
    }

    fn client(server: &mockito::Server, session: SessionStore) -> ApiClient {
        ApiClient::new(&server.url(), &format!("{}/volumes", server.url()), session).unwrap()
    }

    #[tokio::test]
    async fn test_login_parses_account() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/user/login/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"id":"u1","password":"secret"}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"u1","name":"Alice","roleName":"member","token":"abc123"}"#)
            .create();

        let session = SessionStore::open(Database::open_in_memory().unwrap());
        let account = client(&server, session)
            .login("u1", "secret")
            .await
            .unwrap();

        assert_eq!(account.name, "Alice");
        assert_eq!(account.role_name, "member");
        assert_eq!(account.token, "abc123");
        mock.assert();
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/genre/getList/")
            .match_header("authorization", "Bearer xyz")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"name":"Fiction"},{"id":2,"name":"History"}]"#)
            .create();

        let genres = client(&server, logged_in_session("xyz"))
            .list_genres()
            .await
            .unwrap();

        assert_eq!(genres.len(), 2);
        assert_eq!(genres[0].name, "Fiction");
        mock.assert();
    }

    #[tokio::test]
    async fn test_empty_token_sends_bare_bearer() {
        let mut server = mockito::Server::new_async().await;
        // Parsers strip the trailing optional whitespace, so the mock
        // sees either "Bearer " or "Bearer"
        let mock = server
            .mock("GET", "/genre/getList/")
            .match_header(
                "authorization",
                mockito::Matcher::Regex(r"^Bearer\s*$".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create();

        let session = SessionStore::open(Database::open_in_memory().unwrap());
        client(&server, session).list_genres().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_token_is_read_at_request_time() {
        let mut server = mockito::Server::new_async().await;
        let session = SessionStore::open(Database::open_in_memory().unwrap());
        let client = client(&server, session.clone());

        // Log in after the client was built; the next request must carry
        // the fresh token.
        session.set_session(UserSession::new(
            "u1".to_string(),
            "Alice".to_string(),
            "member".to_string(),
            "fresh".to_string(),
        ));

        let mock = server
            .mock("GET", "/genre/getList/")
            .match_header("authorization", "Bearer fresh")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create();

        client.list_genres().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/user/getList/")
            .with_status(500)
            .with_body("boom")
            .create();

        let err = client(&server, logged_in_session("xyz"))
            .list_users()
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_books_posts_condition() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/book/search/")
            .match_header("authorization", "Bearer xyz")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"userId":"u1","title":"wood"}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "userId":"u1","seqNo":1,"title":"Norwegian Wood","author":"Murakami",
                    "price":1200,"publisher":"Vintage","published":"2000-09-12",
                    "buyDate":"2024-05-01","completeDate":"",
                    "genre":{"id":2,"name":"Fiction"},
                    "memo":"","rate":4,"imgUrl":"","infoUrl":""
                }]"#,
            )
            .create();

        let cond = SearchCond {
            user_id: "u1".to_string(),
            title: "wood".to_string(),
            ..SearchCond::default()
        };
        let books = client(&server, logged_in_session("xyz"))
            .search_books(&cond)
            .await
            .unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Norwegian Wood");
        assert_eq!(books[0].genre.name, "Fiction");
        mock.assert();
    }

    #[tokio::test]
    async fn test_delete_book_sends_user_and_seq_no() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/book/delete/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"userId":"u1","seqNo":7}"#.to_string(),
            ))
            .with_status(200)
            .create();

        client(&server, logged_in_session("xyz"))
            .delete_book("u1", 7)
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_download_returns_raw_bytes() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/book/download/")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("seqNo,title\n1,Norwegian Wood\n")
            .create();

        let bytes = client(&server, logged_in_session("xyz"))
            .download_books(&SearchCond::default())
            .await
            .unwrap();

        assert_eq!(bytes, b"seqNo,title\n1,Norwegian Wood\n");
    }

    #[tokio::test]
    async fn test_google_search_is_unauthenticated() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/volumes")
            .match_query(mockito::Matcher::UrlEncoded(
                "q".to_string(),
                "kokoro".to_string(),
            ))
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items":[{"id":"vol1","volumeInfo":{"title":"Kokoro"}}]}"#)
            .create();

        let books = client(&server, logged_in_session("xyz"))
            .search_google_books("kokoro")
            .await
            .unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Kokoro");
        mock.assert();
    }
}
