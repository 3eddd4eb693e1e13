//! Port used by the readiness endpoint to check backing services.
use async_trait::async_trait;

/// Reports whether a dependency can currently serve requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Return `true` when the dependency answered.
    async fn is_ready(&self) -> bool;
}
