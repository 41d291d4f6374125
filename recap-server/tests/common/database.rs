use std::path::PathBuf;
use std::sync::Arc;

use recap_server::database::Database;
use recap_server::error::AppResult;

use super::config::TestConfig;

/// Isolated database living in the test's temporary directory
pub struct TestDatabase {
    pub database: Arc<Database>,
    pub config: TestConfig,
}

#[allow(dead_code)]
impl TestDatabase {
    pub fn new() -> AppResult<Self> {
        let config = TestConfig::new();
        let database = Arc::new(Database::new(config.db_path())?);

        Ok(Self { database, config })
    }

    pub fn path(&self) -> &PathBuf {
        self.config.db_path()
    }

    pub fn db(&self) -> &Arc<Database> {
        &self.database
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        // The TempDir owned by TestConfig removes the file
        tracing::debug!("TestDatabase cleanup: {}", self.config.test_id);
    }
}
