//! Integration tests for memopad.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p memopad-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port with a fresh store,
//! so tests never share memos, users or sessions.
//!
//! The client never follows redirects and keeps no cookie jar: tests read
//! `Location` and `Set-Cookie` themselves and pass the session cookie
//! explicitly.

use std::net::SocketAddr;

use memopad_web::AppState;
use memopad_web::config::MemopadConfig;
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

/// A running memopad server plus a client pointed at it.
pub struct TestServer {
    /// Address the server listens on.
    pub addr: SocketAddr,
    /// HTTP client (no redirects, no cookie jar).
    pub client: Client,
    /// State shared with the server, for asserting on the store directly.
    pub state: AppState,
}

impl TestServer {
    /// Start a server with default configuration.
    pub async fn start() -> Self {
        Self::with_config(MemopadConfig::default()).await
    }

    /// Start a server with the given configuration.
    ///
    /// Host and port from `config` are ignored; the server binds to an
    /// ephemeral port on loopback.
    pub async fn with_config(config: MemopadConfig) -> Self {
        let state = AppState::new(&config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read test listener address");

        let app = memopad_web::app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            state,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET without a session.
    pub async fn get(&self, path: &str) -> Response {
        send(self.client.get(self.url(path))).await
    }

    /// GET with a `Cookie` header.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Response {
        send(self.client.get(self.url(path)).header(COOKIE, cookie)).await
    }

    /// POST a form without a session.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        send(self.client.post(self.url(path)).form(form)).await
    }

    /// POST a form with a `Cookie` header.
    pub async fn post_form_with_cookie(
        &self,
        path: &str,
        cookie: &str,
        form: &[(&str, &str)],
    ) -> Response {
        send(self.client.post(self.url(path)).header(COOKIE, cookie).form(form)).await
    }

    /// Register a user through `POST /register`.
    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.post_form("/register", &[("username", username), ("password", password)])
            .await
    }

    /// Register and log in, returning the `name=value` cookie pair to send
    /// on later requests.
    pub async fn signed_in(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;
        let response = self
            .post_form("/login", &[("username", username), ("password", password)])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login should redirect");
        cookie_pair(&response).expect("login should set a session cookie")
    }
}

async fn send(request: RequestBuilder) -> Response {
    request.send().await.expect("Request failed")
}

/// The `Location` header of a response, if any.
#[must_use]
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// The raw `Set-Cookie` header of a response, if any.
#[must_use]
pub fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// The `name=value` part of the `Set-Cookie` header.
#[must_use]
pub fn cookie_pair(response: &Response) -> Option<String> {
    set_cookie(response).and_then(|raw| raw.split(';').next().map(|pair| pair.trim().to_string()))
}

/// Assert a response is a 303 redirect to `target`.
pub fn assert_redirect(response: &Response, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response).as_deref(), Some(target));
}
