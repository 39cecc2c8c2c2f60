//! Explicit success/failure values for expected failure conditions.
//!
//! Functions that can fail for domain reasons return an [`Outcome`] or a
//! [`ValueOutcome`] instead of raising. A failure carries one or more
//! structured [`Error`]s; callers branch on `is_success` before reading a
//! payload.
//!
//! ```
//! use outcome_core::{Error, ValueError, ValueOutcome};
//!
//! fn parse_age(input: &str) -> ValueOutcome<u8> {
//!     match input.parse::<u8>() {
//!         Ok(age) => age.into(),
//!         Err(_) => ValueOutcome::failure(Error::new("Age.Invalid", "not a number")),
//!     }
//! }
//!
//! assert_eq!(parse_age("42").value(), Ok(&42));
//!
//! let failed = parse_age("forty-two");
//! assert!(failed.is_failure());
//! assert_eq!(failed.errors()[0].code(), "Age.Invalid");
//! assert_eq!(failed.value(), Err(ValueError::InvalidState));
//! ```

mod error;
mod fault;
mod macros;
mod outcome;
mod valued;

pub use error::Error;
pub use fault::{InvariantViolation, ValueError};
pub use outcome::Outcome;
pub use valued::ValueOutcome;

#[doc(hidden)]
pub mod __private {
    pub use crate::macros::enclosing_fn_name;
}
