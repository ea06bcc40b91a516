use thiserror::Error;

/// Validation errors raised while building domain values from caller input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
}

/// Caller-input errors raised by batch quote resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Every entry of the symbol list was blank after trimming.
    #[error("Symbol required")]
    NoSymbol,
}

impl From<ValidationError> for BatchError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::EmptySymbol => Self::NoSymbol,
        }
    }
}
