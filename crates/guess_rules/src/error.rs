//! Error types for guess parsing and target construction.

use crate::types::{TARGET_MAX, TARGET_MIN};
use derive_more::{Display, Error};

/// The submitted guess could not be turned into an integer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvalidGuessInput {
    /// The `guess` field was absent or blank.
    #[display("No guess was submitted")]
    Missing,

    /// The `guess` field held something other than a whole number.
    #[display("{input:?} is not a whole number")]
    NotAnInteger {
        /// The raw text as submitted.
        input: String,
    },
}

/// A target value fell outside the playable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Target {value} is outside {}..={}", TARGET_MIN, TARGET_MAX)]
pub struct TargetOutOfRange {
    /// The rejected value.
    pub value: i64,
}
