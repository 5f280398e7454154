use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tempfile::TempDir;

use pizzeria_api::config::DatabaseConfig;
use pizzeria_api::database::{PizzeriaService, Store};

/// A `pizzeria-api` process serving its own seeded SQLite file
pub struct TestServer {
    pub base_url: String,
    pub database_url: String,
    child: Child,
    _data_dir: TempDir,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        let data_dir = tempfile::tempdir().context("failed to create temp dir")?;
        let database_url = format!("sqlite://{}", data_dir.path().join("pizzeria.db").display());
        seed_database(&database_url).await?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_pizzeria-api"))
            .env("DATABASE_URL", &database_url)
            .env("PIZZERIA_API_HOST", "127.0.0.1")
            .env("PIZZERIA_API_PORT", port.to_string())
            .env("RUST_LOG", "warn")
            .env_remove("APP_ENV")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self {
            base_url,
            database_url,
            child,
            _data_dir: data_dir,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Direct store access for checks the HTTP surface cannot make
    pub async fn service(&self) -> Result<PizzeriaService> {
        let store = Store::connect(&DatabaseConfig::with_url(&self.database_url)).await?;
        Ok(PizzeriaService::new(store))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

async fn seed_database(database_url: &str) -> Result<()> {
    let store = Store::connect(&DatabaseConfig::with_url(database_url)).await?;
    store.migrate().await?;
    PizzeriaService::new(store.clone()).seed().await?;
    store.close().await;
    Ok(())
}

/// Start a fresh server; each test gets its own process and database
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
