use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

use apna_server::auth::{TokenSigner, hash_password};
use apna_server::error::{Error, Result};
use apna_server::mail::{Mailer, OutboundEmail, SendReceipt};
use apna_server::server::{AppState, create_router};
use apna_server::store::{SqliteStore, Store};
use apna_server::types::Admin;

pub const ADMIN_EMAIL: &str = "admin@gmail.com";
pub const ADMIN_PASSWORD: &str = "123456789";
pub const TOKEN_SECRET: &[u8] = b"test-token-secret";

pub const SHELL_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <link rel="stylesheet" crossorigin href="/assets/index-C3YQxwvO.css">
  </head>
  <body>
    <div id="root"></div>
    <script type="module" crossorigin src="/assets/index-D8fk3PqN.js"></script>
  </body>
</html>"#;

/// In-memory mailer that records every dispatched message. Flip `fail` to
/// simulate a provider outage.
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Mail("simulated outage".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(SendReceipt {
            id: Uuid::new_v4().to_string(),
        })
    }
}

pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    pub store: Arc<SqliteStore>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");

        let dist = temp_dir.path().join("dist");
        std::fs::create_dir_all(&dist).expect("create dist dir");
        std::fs::write(dist.join("index.html"), SHELL_HTML).expect("write shell");

        let uploads = temp_dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).expect("create uploads dir");

        let store = Arc::new(
            SqliteStore::new(temp_dir.path().join("apna.db")).expect("open store"),
        );
        store.initialize().expect("initialize store");

        let admin = Admin {
            id: Uuid::new_v4().to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hash password"),
            created_at: Utc::now(),
        };
        store.create_admin(&admin).expect("seed admin");

        let mailer = Arc::new(RecordingMailer::new());

        let state_store: Arc<dyn Store> = store.clone();
        let state_mailer: Arc<dyn Mailer> = mailer.clone();
        let state = Arc::new(AppState {
            store: state_store,
            mailer: state_mailer,
            signer: TokenSigner::new(TOKEN_SECRET),
            frontend_dist: dist,
            uploads_dir: uploads,
        });

        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base_url = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            temp_dir,
            base_url,
            store,
            mailer,
        }
    }

    /// Client with a cookie store so the auth cookie persists across calls.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("build client")
    }

    /// Logs in with the seeded admin credentials, storing the cookie on the
    /// given client.
    pub async fn login(&self, client: &reqwest::Client) {
        let response = client
            .post(format!("{}/api/v1/auth/login", self.base_url))
            .json(&serde_json::json!({
                "email": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD,
            }))
            .send()
            .await
            .expect("login request");
        assert_eq!(response.status(), 200, "login should succeed");
    }

    /// Waits until the recording mailer has captured `count` messages.
    pub async fn wait_for_emails(&self, count: usize) {
        for _ in 0..50 {
            if self.mailer.sent.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!(
            "expected {} emails, saw {}",
            count,
            self.mailer.sent.lock().unwrap().len()
        );
    }
}
