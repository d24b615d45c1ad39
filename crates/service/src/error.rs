use notify_core::error::CoreError;

/// Error type for notification service operations.
///
/// Anonymous callers are not an error for reads and read-state updates;
/// those return their empty value instead. Sending always fails explicitly.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error from `notify_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store could not complete the operation.
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
