pub mod cart_service;
pub mod order_service;
pub mod user_service;

use crate::domain::errors::DomainError;

/// Run a blocking repository call on the blocking thread pool.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, DomainError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?
}
