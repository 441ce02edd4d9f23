//! Integration test harness for Loftwood.
//!
//! Spawns the real server in-process on an OS-assigned port, backed by a
//! throwaway SQLite file and uploads directory in a temp dir. Tests then
//! talk to it over HTTP exactly like the browser client would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loftwood-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use sqlx::SqlitePool;
use tempfile::TempDir;

use loftwood_server::config::ServerConfig;
use loftwood_server::state::AppState;
use loftwood_server::{app, db};

/// A running server instance with its own database and uploads dir.
pub struct TestServer {
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    /// Pool into the server's database, for seeding and assertions.
    pub pool: SqlitePool,
    /// The uploads directory the server writes avatars under.
    pub uploads_dir: PathBuf,
    _tempdir: TempDir,
}

impl TestServer {
    /// Spawn a fresh server with an empty database.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up; there is no
    /// point running tests against a half-started server.
    pub async fn spawn() -> Self {
        let tempdir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = tempdir.path().join("loftwood-test.db");
        let uploads_dir = tempdir.path().join("uploads");

        let config = ServerConfig {
            database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            uploads_dir: uploads_dir.clone(),
            cors_origin: None,
        };

        let pool = db::create_pool(&config.database_url)
            .await
            .expect("Failed to create database pool");
        db::migrate(&pool).await.expect("Failed to apply schema");

        let state = AppState::new(config, pool.clone());
        let router = app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            pool,
            uploads_dir,
            _tempdir: tempdir,
        }
    }

    /// A cookie-keeping HTTP client, like a browser tab.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Absolute URL for a path on the spawned server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Seed a small catalog: two categories, three products, images.
    ///
    /// # Panics
    ///
    /// Panics if the inserts fail.
    pub async fn seed_catalog(&self) {
        sqlx::raw_sql(
            r"
            INSERT INTO categories (id, name, slug) VALUES
                (1, 'Sofas', 'sofas'),
                (2, 'Tables', 'tables');

            INSERT INTO products (id, title, price, description, characteristics, category_id) VALUES
                (1, 'Loft Sofa', '45 990 ₽', 'A deep three-seat sofa', 'Width: 220 cm', 1),
                (2, 'Compact Sofa', '29 990 ₽', 'A two-seat sofa for small rooms', 'Width: 160 cm', 1),
                (3, 'Oak Table', '18 500 ₽', 'Solid oak dining table', 'Length: 180 cm', 2);

            INSERT INTO product_images (product_id, image_url, sort_order) VALUES
                (1, '/images/sofa-1-front.jpg', 0),
                (1, '/images/sofa-1-side.jpg', 1),
                (3, '/images/table-3.jpg', 0);
            ",
        )
        .execute(&self.pool)
        .await
        .expect("Failed to seed catalog");
    }
}

/// A valid registration body with the given email.
#[must_use]
pub fn registration_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Test User",
        "phone": "+7 900 000-00-00",
        "email": email,
        "password": "abc123",
        "confirmPassword": "abc123",
        "subscribeNews": true,
    })
}
