//! Success/failure without a payload.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fault::{InvariantResult, InvariantViolation};

/// The outcome of an operation that produces no value.
///
/// A success carries no errors. A failure carries at least one error, none of
/// which is [`Error::NONE`]. Both states are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "OutcomeRecord")]
pub struct Outcome {
    is_success: bool,
    errors: Vec<Error>,
}

impl Outcome {
    /// ## Summary
    /// Creates an outcome after checking that the success flag and the errors
    /// agree.
    ///
    /// Supplied [`Error::NONE`] placeholders are dropped from a success. A
    /// failure without errors falls back to [`Error::DEFAULT`].
    ///
    /// ## Panics
    /// If `is_success` is `true` and any error is not [`Error::NONE`], or if
    /// `is_success` is `false` and any error is [`Error::NONE`]. Either is a
    /// misuse of the API, not a domain failure.
    #[must_use]
    #[track_caller]
    pub fn new(is_success: bool, errors: impl IntoIterator<Item = Error>) -> Self {
        let errors = enforce(check(is_success, errors.into_iter().collect()));
        Self { is_success, errors }
    }

    /// ## Summary
    /// Creates an outcome from an optional failure message.
    ///
    /// A success ignores the message. A failure gets one error built from the
    /// message, or [`Error::DEFAULT`] when the message is absent or empty.
    #[must_use]
    #[track_caller]
    pub fn with_message(is_success: bool, message: Option<&str>) -> Self {
        if is_success {
            Self::success()
        } else {
            Self::failure_message(message.unwrap_or_default().to_owned())
        }
    }

    #[must_use]
    pub const fn success() -> Self {
        Self {
            is_success: true,
            errors: Vec::new(),
        }
    }

    /// ## Panics
    /// If `error` is [`Error::NONE`].
    #[must_use]
    #[track_caller]
    pub fn failure(error: Error) -> Self {
        Self::new(false, [error])
    }

    /// Creates a failure carrying `errors`, or [`Error::DEFAULT`] if there are
    /// none.
    ///
    /// ## Panics
    /// If any error is [`Error::NONE`].
    #[must_use]
    #[track_caller]
    pub fn failure_all(errors: impl IntoIterator<Item = Error>) -> Self {
        Self::new(false, errors)
    }

    /// Creates a failure whose single error carries `message` and the caller's
    /// location. An empty message yields [`Error::DEFAULT`].
    #[must_use]
    #[track_caller]
    pub fn failure_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            is_success: false,
            errors: message_errors(message.into()),
        }
    }

    pub(crate) const fn from_checked(is_success: bool, errors: Vec<Error>) -> Self {
        Self { is_success, errors }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.is_success
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.is_success
    }

    /// The errors in the order they were supplied. Empty on success.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::success()
    }
}

/// ## Summary
/// Checks that `errors` agrees with `is_success` and normalizes it.
///
/// ## Errors
/// Returns the violated invariant instead of panicking so that
/// deserialization can report it as a data error.
pub(crate) fn check(is_success: bool, errors: Vec<Error>) -> InvariantResult<Vec<Error>> {
    if is_success {
        let count = errors.iter().filter(|error| !error.is_none()).count();
        if count > 0 {
            return Err(InvariantViolation::SuccessWithErrors { count });
        }
        if !errors.is_empty() {
            tracing::trace!(placeholders = errors.len(), "dropping Error::NONE placeholders");
        }
        return Ok(Vec::new());
    }

    if let Some(index) = errors.iter().position(Error::is_none) {
        return Err(InvariantViolation::FailureWithNoneError { index });
    }
    if errors.is_empty() {
        tracing::trace!("failure without errors, falling back to Error::DEFAULT");
        return Ok(vec![Error::DEFAULT]);
    }
    tracing::trace!(errors = errors.len(), "constructing failed outcome");
    Ok(errors)
}

/// Unwraps a checked value, panicking at the caller's location on violation.
#[track_caller]
pub(crate) fn enforce<T>(checked: InvariantResult<T>) -> T {
    match checked {
        Ok(value) => value,
        Err(violation) => {
            tracing::error!(%violation, "outcome invariant violated");
            panic!("{violation}");
        }
    }
}

#[track_caller]
pub(crate) fn message_errors(message: Cow<'static, str>) -> Vec<Error> {
    if message.is_empty() {
        vec![Error::DEFAULT]
    } else {
        vec![Error::from_message(message)]
    }
}

/// Wire shape accepted on input. `Errors` may be missing or `null`.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OutcomeRecord {
    is_success: bool,
    #[serde(default)]
    errors: Option<Vec<Error>>,
}

impl TryFrom<OutcomeRecord> for Outcome {
    type Error = InvariantViolation;

    fn try_from(record: OutcomeRecord) -> Result<Self, Self::Error> {
        let errors = check(record.is_success, record.errors.unwrap_or_default())
            .inspect_err(|violation| tracing::debug!(%violation, "rejecting serialized outcome"))?;
        Ok(Self::from_checked(record.is_success, errors))
    }
}
