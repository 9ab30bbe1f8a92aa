//! Core domain types for guess-the-number.

use crate::error::{InvalidGuessInput, TargetOutOfRange};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use tracing::{debug, instrument};

/// Smallest value a target can take.
pub const TARGET_MIN: i64 = 1;

/// Largest value a target can take.
pub const TARGET_MAX: i64 = 99;

/// The secret number the player is trying to find.
///
/// Always within [`TARGET_MIN`]`..=`[`TARGET_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Target(i64);

impl Target {
    /// Creates a target, rejecting values outside the playable range.
    #[instrument]
    pub fn new(value: i64) -> Result<Self, TargetOutOfRange> {
        if (TARGET_MIN..=TARGET_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            debug!(value, "Rejected out-of-range target");
            Err(TargetOutOfRange { value })
        }
    }

    /// Creates a target, pulling out-of-range values onto the nearest bound.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(TARGET_MIN, TARGET_MAX))
    }

    /// Returns the numeric value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Target {
    type Error = TargetOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Target> for i64 {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A number submitted by the player.
///
/// Guesses are not range checked; anything that parses is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guess(i64);

impl Guess {
    /// Wraps an already-parsed value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parses raw form input.
    ///
    /// Surrounding whitespace is ignored and a leading `+` or `-` is allowed.
    /// Integers too long for `i64` saturate to `i64::MAX` or `i64::MIN`;
    /// targets sit far inside that range, so they compare the same way.
    /// A missing or blank field is [`InvalidGuessInput::Missing`].
    #[instrument]
    pub fn parse(raw: Option<&str>) -> Result<Self, InvalidGuessInput> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(InvalidGuessInput::Missing);
        }

        match trimmed.parse::<i64>() {
            Ok(value) => Ok(Self(value)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => {
                    debug!(input = trimmed, "Guess saturated to i64::MAX");
                    Ok(Self(i64::MAX))
                }
                IntErrorKind::NegOverflow => {
                    debug!(input = trimmed, "Guess saturated to i64::MIN");
                    Ok(Self(i64::MIN))
                }
                _ => {
                    debug!(input = trimmed, error = %e, "Guess is not an integer");
                    Err(InvalidGuessInput::NotAnInteger {
                        input: trimmed.to_string(),
                    })
                }
            },
        }
    }

    /// Returns the numeric value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of comparing one guess against the target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The guess equals the target.
    Correct,
    /// The guess is above the target.
    TooHigh,
    /// The guess is below the target.
    TooLow,
}

/// Label displayed on the game page.
///
/// [`ResultCategory::NoInput`] is shown right after a new target is drawn;
/// the rest mirror [`Outcome`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResultCategory {
    /// No guess has been made against the current target.
    NoInput,
    /// The last guess was right.
    Correct,
    /// The last guess was too high.
    TooHigh,
    /// The last guess was too low.
    TooLow,
}

impl From<Outcome> for ResultCategory {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => Self::Correct,
            Outcome::TooHigh => Self::TooHigh,
            Outcome::TooLow => Self::TooLow,
        }
    }
}
