//! Success/failure carrying a payload.

use std::borrow::Cow;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::fault::{InvariantViolation, ValueError};
use crate::outcome::{self, Outcome};

/// An [`Outcome`] that also carries a payload on success.
///
/// The payload is only readable through [`value`](Self::value) and
/// [`into_value`](Self::into_value), which report a [`ValueError`] instead of
/// handing out a default when the outcome failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueOutcome<T> {
    value: Option<T>,
    outcome: Outcome,
}

impl<T> ValueOutcome<T> {
    /// ## Summary
    /// Creates an outcome after checking that the success flag and the errors
    /// agree. A failure drops the supplied payload.
    ///
    /// ## Panics
    /// Under the same conditions as [`Outcome::new`].
    #[must_use]
    #[track_caller]
    pub fn new(value: Option<T>, is_success: bool, errors: impl IntoIterator<Item = Error>) -> Self {
        let errors = outcome::enforce(outcome::check(is_success, errors.into_iter().collect()));
        Self::from_parts(value, Outcome::from_checked(is_success, errors))
    }

    /// Creates an outcome from an optional failure message. See
    /// [`Outcome::with_message`].
    #[must_use]
    #[track_caller]
    pub fn with_message(value: Option<T>, is_success: bool, message: Option<&str>) -> Self {
        Self::from_parts(value, Outcome::with_message(is_success, message))
    }

    #[must_use]
    pub const fn success(value: T) -> Self {
        Self {
            value: Some(value),
            outcome: Outcome::success(),
        }
    }

    /// ## Panics
    /// If `error` is [`Error::NONE`].
    #[must_use]
    #[track_caller]
    pub fn failure(error: Error) -> Self {
        Self::from_parts(None, Outcome::failure(error))
    }

    /// ## Panics
    /// If any error is [`Error::NONE`].
    #[must_use]
    #[track_caller]
    pub fn failure_all(errors: impl IntoIterator<Item = Error>) -> Self {
        Self::from_parts(None, Outcome::failure_all(errors))
    }

    #[must_use]
    #[track_caller]
    pub fn failure_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(None, Outcome::failure_message(message))
    }

    fn from_parts(value: Option<T>, outcome: Outcome) -> Self {
        Self {
            value: value.filter(|_| outcome.is_success()),
            outcome,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        self.outcome.errors()
    }

    /// ## Summary
    /// Borrows the payload.
    ///
    /// ## Errors
    /// [`ValueError::InvalidState`] if the outcome failed,
    /// [`ValueError::MissingValue`] if it succeeded without a payload.
    pub fn value(&self) -> Result<&T, ValueError> {
        if self.is_failure() {
            return Err(ValueError::InvalidState);
        }
        self.value.as_ref().ok_or(ValueError::MissingValue)
    }

    /// Takes the payload. Fails like [`value`](Self::value).
    ///
    /// ## Errors
    /// [`ValueError::InvalidState`] if the outcome failed,
    /// [`ValueError::MissingValue`] if it succeeded without a payload.
    pub fn into_value(self) -> Result<T, ValueError> {
        if self.is_failure() {
            return Err(ValueError::InvalidState);
        }
        self.value.ok_or(ValueError::MissingValue)
    }

    /// Transforms the payload of a success. Failures pass through unchanged.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValueOutcome<U> {
        ValueOutcome {
            value: self.value.map(f),
            outcome: self.outcome,
        }
    }

    #[must_use]
    pub const fn as_outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

impl<T> From<T> for ValueOutcome<T> {
    fn from(value: T) -> Self {
        Self::success(value)
    }
}

impl<T> From<ValueOutcome<T>> for Outcome {
    fn from(outcome: ValueOutcome<T>) -> Self {
        outcome.outcome
    }
}

impl<T: Serialize> Serialize for ValueOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValueOutcome", 3)?;
        state.serialize_field("IsSuccess", &self.is_success())?;
        match &self.value {
            Some(value) => state.serialize_field("Value", value)?,
            None => state.skip_field("Value")?,
        }
        state.serialize_field("Errors", self.errors())?;
        state.end()
    }
}

/// A present `Value`. It is read as `T` first, so payloads that serialize to
/// `null` survive; `null` only means "no payload" when `T` rejects it.
#[derive(Deserialize)]
#[serde(untagged)]
enum ValueSlot<T> {
    Present(T),
    Null,
}

impl<T> ValueSlot<T> {
    // A plain `#[serde(default)]` would require `T: Default`.
    const fn absent() -> Self {
        Self::Null
    }

    fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Null => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ValueOutcomeRecord<T> {
    is_success: bool,
    #[serde(default = "ValueSlot::absent")]
    value: ValueSlot<T>,
    #[serde(default)]
    errors: Option<Vec<Error>>,
}

impl<T> TryFrom<ValueOutcomeRecord<T>> for ValueOutcome<T> {
    type Error = InvariantViolation;

    fn try_from(record: ValueOutcomeRecord<T>) -> Result<Self, Self::Error> {
        let errors = outcome::check(record.is_success, record.errors.unwrap_or_default())
            .inspect_err(|violation| tracing::debug!(%violation, "rejecting serialized outcome"))?;
        let value = record.value.into_option();
        if !record.is_success && value.is_some() {
            tracing::debug!("dropping value of serialized failure");
        }
        Ok(Self::from_parts(
            value,
            Outcome::from_checked(record.is_success, errors),
        ))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ValueOutcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ValueOutcomeRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}
