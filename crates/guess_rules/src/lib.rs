//! Pure guess-the-number game logic.
//!
//! This crate knows nothing about HTTP. It provides:
//!
//! - **Types**: [`Target`], [`Guess`] and the result labels shown to the player
//! - **Rules**: the three-way [`evaluate`] comparison and the per-target [`Round`]
//! - **Sources**: the [`NumberSource`] trait with random, seeded and scripted implementations
//!
//! # Example
//!
//! ```
//! use guess_rules::{Guess, Outcome, Round, SequenceSource, NumberSource};
//!
//! let source = SequenceSource::constant(50);
//! let mut round = Round::new(source.generate());
//!
//! let guess = Guess::parse(Some("75")).expect("valid input");
//! assert_eq!(round.submit(guess), Outcome::TooHigh);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod rules;
mod source;
mod types;

pub use error::{InvalidGuessInput, TargetOutOfRange};
pub use rules::{PageState, Round, evaluate};
pub use source::{NumberSource, SeededSource, SequenceSource, ThreadRngSource};
pub use types::{Guess, Outcome, ResultCategory, TARGET_MAX, TARGET_MIN, Target};
