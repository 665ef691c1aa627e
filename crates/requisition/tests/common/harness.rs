//! A request store served over HTTP from a temporary database.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use requisition::{router, AppState, DatabaseLocation, HttpRequestStore, SharedDatabase};

pub struct TestHarness {
    temp_dir: TempDir,
    /// Where the store's SQLite file lives.
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl TestHarness {
    /// Starts a server backed by a fresh on-disk database.
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("data").join("requisition.db");
        let location = DatabaseLocation::File(db_path.clone());
        Self::serve(temp_dir, db_path, location).await
    }

    /// Starts a server whose database can never be opened.
    pub async fn start_broken() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").expect("Failed to write blocker file");
        let db_path = blocker.join("requisition.db");
        let location = DatabaseLocation::File(db_path.clone());
        Self::serve(temp_dir, db_path, location).await
    }

    async fn serve(temp_dir: TempDir, db_path: PathBuf, location: DatabaseLocation) -> Self {
        let state = AppState {
            db: Arc::new(SharedDatabase::new(location)),
        };
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await
                .expect("Test server failed");
        });

        Self {
            temp_dir,
            db_path,
            addr,
            state,
            shutdown: Some(tx),
            server: Some(server),
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> HttpRequestStore {
        HttpRequestStore::new(self.base_url(), Duration::from_secs(5))
            .expect("Failed to build HTTP client")
    }

    /// Stops the server and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(server) = self.server.take() {
            let _ = server.await;
        }
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            server.abort();
        }
    }
}
