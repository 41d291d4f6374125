use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tempfile::TempDir;

use recap_server::config::{AppConfig, AuthConfig, DatabaseConfig, LlmConfig, ServerConfig};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Get a unique test identifier for isolation
pub fn get_unique_test_id() -> String {
    let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let pid = std::process::id();
    format!("test-{}-{}", pid, counter)
}

pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-testing-purposes-only";

/// Test-specific configuration backed by its own temporary directory
#[derive(Debug)]
pub struct TestConfig {
    pub temp_dir: TempDir,
    pub config: AppConfig,
    pub test_id: String,
}

#[allow(dead_code)]
impl TestConfig {
    pub fn new() -> Self {
        let test_id = get_unique_test_id();
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory for test");

        let db_path = temp_dir.path().join(format!("recap-test-{}.db", test_id));

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig { path: db_path },
            auth: AuthConfig {
                session_secret: Some(TEST_SESSION_SECRET.to_string()),
                ..AuthConfig::default()
            },
            llm: LlmConfig::default(),
            smtp: None,
            logging: None,
        };

        Self {
            temp_dir,
            config,
            test_id,
        }
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.config.database.path
    }
}
