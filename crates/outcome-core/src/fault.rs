use thiserror::Error;

/// Construction-time contract violations.
///
/// These describe misuse of the API by calling code. The checked constructors
/// panic with this message; it never becomes a failed outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Invalid state: a successful outcome cannot carry {count} error(s)")]
    SuccessWithErrors { count: usize },

    #[error("Invalid state: a failed outcome cannot carry Error::NONE (at index {index})")]
    FailureWithNoneError { index: usize },
}

/// Faults raised when reading the payload of a [`ValueOutcome`](crate::ValueOutcome).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// The outcome is a failure; check `is_success` before reading the value.
    #[error("Invalid state: cannot read the value of a failed outcome")]
    InvalidState,

    /// The outcome succeeded but no payload was stored.
    #[error("Missing value: the successful outcome carries no value")]
    MissingValue,
}

pub type InvariantResult<T> = std::result::Result<T, InvariantViolation>;
