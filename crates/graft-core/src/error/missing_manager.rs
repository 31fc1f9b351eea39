use super::Error;

/// Error when an operation that resolves, creates, or merges entities runs
/// without a persistence manager supplied.
#[derive(Debug)]
pub(super) struct MissingManagerError {
    pub(super) operation: &'static str,
}

impl std::error::Error for MissingManagerError {}

impl core::fmt::Display for MissingManagerError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "a persistence manager is required to {}; provide one with `Assigner::with_manager`",
            self.operation
        )
    }
}

impl Error {
    /// Creates a missing manager error naming the operation that needed one.
    pub fn missing_manager(operation: &'static str) -> Error {
        Error::from(super::ErrorKind::MissingManager(MissingManagerError {
            operation,
        }))
    }

    /// Returns `true` if this error is a missing manager error.
    pub fn is_missing_manager(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingManager(_))
    }
}
