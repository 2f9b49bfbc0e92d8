//! Integration tests for Góndola.
//!
//! The harness builds the full storefront router (session layer included)
//! against an in-memory `SQLite` session store and a local catalog fixture
//! server, then drives it over HTTP with `tower::ServiceExt::oneshot`. The
//! session cookie from responses is carried into subsequent requests, so a
//! [`TestContext`] behaves like one browser profile.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations, totals, badge counts
//! - `catalog` - Grid rendering, description fragments, load failure
//! - `contact` - Form validation round trips
//! - `preferences` - Preference slots and dark-mode toggle

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::get;
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use tower_sessions_sqlx_store::SqliteStore;
use url::Url;

use gondola_storefront::config::StoreConfig;
use gondola_storefront::middleware::create_session_layer;
use gondola_storefront::routes;
use gondola_storefront::state::AppState;

/// The catalog document served by the fixture server.
pub const DEFAULT_CATALOG: &str = r#"[
    {"id": 1, "name": "Malbec Reserva", "price": 5000,
     "image": "malbec-reserva.jpg", "description": "Twelve months in French oak."},
    {"id": 2, "name": "Torrontés Salta", "price": 3500,
     "image": "torrontes-salta.jpg", "description": "Floral nose, crisp citrus."},
    {"id": 3, "name": "Blend de Finca", "price": 9500,
     "image": "blend-de-finca.jpg", "description": "Estate blend, built to age."}
]"#;

/// A response captured from the app.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Assert the body contains a fragment, with a readable failure.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.body.contains(needle),
            "expected body to contain {needle:?}\nbody: {}",
            self.body
        );
    }

    /// Assert the body does not contain a fragment.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.body.contains(needle),
            "expected body to not contain {needle:?}\nbody: {}",
            self.body
        );
    }
}

/// One browser profile talking to a fully assembled storefront.
pub struct TestContext {
    app: Router,
    cookie: Option<String>,
}

impl TestContext {
    /// Build a context whose catalog fixture serves the default document.
    pub async fn new() -> Self {
        Self::with_catalog(StatusCode::OK, DEFAULT_CATALOG).await
    }

    /// Build a context whose catalog fixture serves a fixed response.
    pub async fn with_catalog(status: StatusCode, body: &'static str) -> Self {
        let catalog_url = spawn_catalog_fixture(status, body).await;

        let config = StoreConfig {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost".to_string(),
            catalog_url,
            image_base: "/static/img".to_string(),
            session_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        // One connection so every request sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&config.database_url)
            .await
            .unwrap();
        SqliteStore::new(pool.clone()).migrate().await.unwrap();

        let session_layer = create_session_layer(&pool, &config);
        let state = AppState::new(config, pool);

        let app = Router::new()
            .merge(routes::routes())
            .layer(session_layer)
            .with_state(state);

        Self { app, cookie: None }
    }

    /// GET a path, carrying the session cookie.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST a urlencoded form, carrying the session cookie.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn request_builder(&self, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();

        // Adopt any session cookie the response sets
        if let Some(set_cookie) = headers.get(header::SET_COOKIE)
            && let Ok(value) = set_cookie.to_str()
            && let Some(pair) = value.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(body.to_vec()).unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Serve a fixed catalog response on an ephemeral port.
async fn spawn_catalog_fixture(status: StatusCode, body: &'static str) -> Url {
    let app = Router::new().route("/products.json", get(move || async move { (status, body) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}/products.json")).unwrap()
}
