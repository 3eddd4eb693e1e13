//! Shared embedded PostgreSQL helpers for backend integration tests.
//!
//! Every test gets its own freshly migrated database on the process-wide
//! embedded cluster. Set `SKIP_TEST_CLUSTER=1` where the cluster cannot be
//! started; otherwise a bootstrap failure fails the test.

use editfolio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Returns true when `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, panic otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create a uniquely named database on the shared cluster and return its URL.
pub fn provision_database() -> Result<String, String> {
    let cluster = pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("{err:?}"))?;
    let name = format!("editfolio_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    Ok(cluster.connection().database_url(&name))
}

/// Migrated database plus the runtime its pool was built on.
pub struct TestDatabase {
    /// Runtime driving every async call in the test.
    pub runtime: Runtime,
    /// Pool connected to the test database.
    pub pool: DbPool,
}

fn setup() -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let url = provision_database()?;
    let pool = runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(&url).with_max_size(2).with_min_idle(Some(1)))
            .await
            .map_err(|err| err.to_string())
    })?;
    Ok(TestDatabase { runtime, pool })
}

/// Migrated test database, or `None` when the cluster is skipped.
pub fn test_database() -> Option<TestDatabase> {
    setup().map_or_else(handle_cluster_setup_failure, Some)
}
