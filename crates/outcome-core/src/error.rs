//! Structured failure causes.
//!
//! ## Summary
//! An [`Error`] records a code, a message, and where it was raised. Two
//! sentinels are reserved: [`Error::NONE`] for "no error" and
//! [`Error::DEFAULT`] for "unspecified error".

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;

use serde::{Deserialize, Deserializer, Serialize};

/// One failure cause.
///
/// Equality and hashing consider only `code` and `message`; the call-site
/// fields are diagnostic metadata.
///
/// This is deliberately narrower than full structural equality: two errors
/// raised from different places with the same code and message compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Error {
    #[serde(default, deserialize_with = "null_as_empty")]
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    #[serde(default, deserialize_with = "null_as_zero")]
    line_number: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    member_name: Cow<'static, str>,
    #[serde(default, deserialize_with = "null_as_empty")]
    file_path: Cow<'static, str>,
}

impl Error {
    /// Absence of error. Never part of a failure's error collection.
    pub const NONE: Self = Self::constant("", "");

    /// Fallback used when a failure is built without an explicit error.
    pub const DEFAULT: Self = Self::constant("Error.Unknown", "An unknown error occurred.");

    const fn constant(code: &'static str, message: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
            line_number: 0,
            member_name: Cow::Borrowed(""),
            file_path: Cow::Borrowed(""),
        }
    }

    /// ## Summary
    /// Creates an error, capturing the caller's line and file.
    ///
    /// `member_name` is left empty; use [`domain_error!`](crate::domain_error)
    /// to capture the enclosing function as well.
    #[must_use]
    #[track_caller]
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        let location = Location::caller();
        Self {
            code: code.into(),
            message: message.into(),
            line_number: location.line(),
            member_name: Cow::Borrowed(""),
            file_path: Cow::Borrowed(location.file()),
        }
    }

    /// Creates an error without a code, capturing the caller's line and file.
    #[must_use]
    #[track_caller]
    pub fn from_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("", message)
    }

    /// Creates an error with explicit call-site metadata. Nothing is captured.
    #[must_use]
    pub fn with_call_site(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        line_number: u32,
        member_name: impl Into<Cow<'static, str>>,
        file_path: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            line_number,
            member_name: member_name.into(),
            file_path: file_path.into(),
        }
    }

    /// Replaces the member name.
    #[must_use]
    pub fn in_member(mut self, member_name: impl Into<Cow<'static, str>>) -> Self {
        self.member_name = member_name.into();
        self
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn line_number(&self) -> u32 {
        self.line_number
    }

    #[must_use]
    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Returns `true` if any call-site metadata was recorded.
    #[must_use]
    pub fn has_call_site(&self) -> bool {
        self.line_number != 0 || !self.member_name.is_empty() || !self.file_path.is_empty()
    }

    /// Returns `true` if this is the [`Error::NONE`] sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.code.is_empty() && self.message.is_empty()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.message.hash(state);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for Error {}

// Serialized records may carry `null` for optional strings.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Cow<'static, str>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map_or(Cow::Borrowed(""), Cow::Owned))
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_captures_caller_location() {
        let line = line!() + 1;
        let error = Error::new("E1", "boom");

        assert_eq!(error.code(), "E1");
        assert_eq!(error.message(), "boom");
        assert_eq!(error.line_number(), line);
        assert_eq!(error.file_path(), file!());
        assert_eq!(error.member_name(), "");
        assert!(error.has_call_site());
    }

    #[test]
    fn from_message_has_no_code() {
        let error = Error::from_message("Operation failed");
        assert_eq!(error.code(), "");
        assert_eq!(error.message(), "Operation failed");
        assert!(!error.is_none());
    }

    #[test]
    fn with_call_site_keeps_explicit_metadata() {
        let error = Error::with_call_site("E2", "bad input", 7, "parse", "src/parse.rs");
        assert_eq!(error.line_number(), 7);
        assert_eq!(error.member_name(), "parse");
        assert_eq!(error.file_path(), "src/parse.rs");
    }

    #[test]
    fn equality_ignores_call_site() {
        let first = Error::new("E1", "boom");
        let second = Error::with_call_site("E1", "boom", 99, "elsewhere", "other.rs");
        assert_eq!(first, second);
        assert_ne!(first, Error::new("E1", "bang"));
        assert_ne!(first, Error::new("E2", "boom"));
    }

    #[test]
    fn sentinels() {
        assert!(Error::NONE.is_none());
        assert!(!Error::NONE.has_call_site());
        assert!(Error::new("", "").is_none());

        assert!(!Error::DEFAULT.is_none());
        assert_eq!(Error::DEFAULT.message(), "An unknown error occurred.");
        assert_ne!(Error::DEFAULT, Error::NONE);
    }

    #[test]
    fn display() {
        assert_eq!(Error::new("E1", "boom").to_string(), "E1: boom");
        assert_eq!(Error::from_message("boom").to_string(), "boom");
    }

    #[test]
    fn deserialize_requires_only_message() {
        let error: Error = serde_json::from_str(r#"{"Message":"boom"}"#).unwrap();
        assert_eq!(error, Error::from_message("boom"));
        assert!(!error.has_call_site());

        let error: Error =
            serde_json::from_str(r#"{"Code":null,"Message":"boom","MemberName":null}"#).unwrap();
        assert_eq!(error.code(), "");
        assert_eq!(error.member_name(), "");
    }

    #[test]
    fn deserialize_accepts_null_call_site_fields() {
        let error: Error = serde_json::from_str(
            r#"{"Code":"E1","Message":"boom","LineNumber":null,"MemberName":null,"FilePath":null}"#,
        )
        .unwrap();
        assert_eq!(error, Error::new("E1", "boom"));
        assert_eq!(error.line_number(), 0);
        assert!(!error.has_call_site());
    }

    #[test]
    fn equal_errors_may_differ_in_call_site() {
        let here = Error::with_call_site("E1", "boom", 10, "load", "a.rs");
        let there = Error::with_call_site("E1", "boom", 20, "save", "b.rs");
        assert_eq!(here, there);
        assert_ne!(here.line_number(), there.line_number());
    }

    #[test]
    fn serialize_uses_pascal_case_fields() {
        let error = Error::with_call_site("E1", "boom", 3, "run", "main.rs");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Code": "E1",
                "Message": "boom",
                "LineNumber": 3,
                "MemberName": "run",
                "FilePath": "main.rs"
            })
        );
    }
}
