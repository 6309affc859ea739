use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// A recurring rule lacks a field its frequency requires, or carries an
    /// anchor that cannot be turned into a date.
    #[error("Configuration error in recurring rule {rule_id}: {reason}")]
    Configuration { rule_id: i32, reason: String },

    /// Numeric input that should have been rejected at the boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from date operations
    #[error("Date error: {0}")]
    Date(String),

    /// A money total that does not fit in a decimal.
    #[error("Amount overflow: {0}")]
    Overflow(String),
}

impl ComputeError {
    pub fn configuration(rule_id: i32, reason: impl Into<String>) -> Self {
        ComputeError::Configuration {
            rule_id,
            reason: reason.into(),
        }
    }

    /// Misconfigured rules are skipped by batch processing instead of failing it.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ComputeError::Configuration { .. })
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
