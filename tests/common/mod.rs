#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub const SUPERADMIN: (&str, &str) = ("superadmin", "superpass");

// Shared while any test holds it; the last holder's drop stops the process
static SERVER: Mutex<Weak<TestServer>> = Mutex::new(Weak::new());
static UNIQUE: AtomicUsize = AtomicUsize::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // In-memory store: every run starts from a fresh superadmin-only state
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_item-data-api"));
        cmd.env("API_PORT", port.to_string())
            .env_remove("DATABASE_URL")
            .env_remove("PORT")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).basic_auth(SUPERADMIN.0, Some(SUPERADMIN.1)).send().await {
                // Any answer from the auth layer means the listener is up
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::UNAUTHORIZED {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Start a server owned by the caller alone
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn ensure_server() -> Result<Arc<TestServer>> {
    let server = {
        let mut slot = SERVER.lock().map_err(|_| anyhow::anyhow!("test server lock poisoned"))?;
        match slot.upgrade() {
            Some(server) => server,
            None => {
                let server = Arc::new(TestServer::spawn()?);
                *slot = Arc::downgrade(&server);
                server
            }
        }
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Username that no other test in this binary will pick
pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}_{}", prefix, std::process::id(), UNIQUE.fetch_add(1, Ordering::SeqCst))
}

/// Sign up anonymously and return the stored user
pub async fn signup(server: &TestServer, username: &str, password: &str, role: &str) -> Result<serde_json::Value> {
    let res = reqwest::Client::new()
        .post(server.url("/users"))
        .json(&serde_json::json!({ "username": username, "password": password, "role": role }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "signup failed with {}", res.status());
    Ok(res.json().await?)
}

pub fn item_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "itemName": name,
        "itemCost": "42",
        "itemQuantity": 3,
        "itemPack": "Y",
        "itemContent": 12,
        "itemDimensions": 30,
        "itemOriginLocation": "Porto",
        "itemShip": false,
        "itemCompany": "Acme",
        "itemManufacturingDateTime": "2024-03-01T08:00:00",
        "itemExpiryDate": "2026-03-01"
    })
}
