//! Game rules: comparing guesses and tracking a round.

use crate::types::{Guess, Outcome, ResultCategory, Target};
use derive_new::new;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Compares a guess against the target.
///
/// Exactly one outcome applies to every pair of integers.
#[instrument]
pub fn evaluate(guess: Guess, target: Target) -> Outcome {
    match guess.value().cmp(&target.value()) {
        Ordering::Equal => Outcome::Correct,
        Ordering::Greater => Outcome::TooHigh,
        Ordering::Less => Outcome::TooLow,
    }
}

/// What the game page is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// A target was just drawn; nothing has been guessed yet.
    Fresh,
    /// The most recent guess produced this outcome.
    Evaluated(Outcome),
}

impl PageState {
    /// Returns the label to display for this state.
    pub fn category(self) -> ResultCategory {
        match self {
            Self::Fresh => ResultCategory::NoInput,
            Self::Evaluated(outcome) => outcome.into(),
        }
    }
}

/// One target and the guesses made against it.
///
/// A round starts [`PageState::Fresh`] and never changes its target.
/// Drawing a new target means starting a new round.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Round {
    target: Target,
    #[new(value = "PageState::Fresh")]
    state: PageState,
    #[new(default)]
    guesses: u32,
}

impl Round {
    /// Returns the target.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the page state.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Returns how many guesses were evaluated in this round.
    pub fn guesses(&self) -> u32 {
        self.guesses
    }

    /// Evaluates a guess and records it.
    #[instrument(skip(self), fields(guesses = self.guesses))]
    pub fn submit(&mut self, guess: Guess) -> Outcome {
        let outcome = evaluate(guess, self.target);
        self.state = PageState::Evaluated(outcome);
        self.guesses = self.guesses.saturating_add(1);
        debug!(%guess, %outcome, guesses = self.guesses, "Guess evaluated");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TARGET_MAX, TARGET_MIN};

    fn target(value: i64) -> Target {
        Target::new(value).expect("value in range")
    }

    #[test]
    fn test_scenarios_against_fifty() {
        let fifty = target(50);
        assert_eq!(evaluate(Guess::new(50), fifty), Outcome::Correct);
        assert_eq!(evaluate(Guess::new(75), fifty), Outcome::TooHigh);
        assert_eq!(evaluate(Guess::new(10), fifty), Outcome::TooLow);
    }

    #[test]
    fn test_comparison_is_total_over_range() {
        for t in TARGET_MIN..=TARGET_MAX {
            for g in TARGET_MIN..=TARGET_MAX {
                let outcome = evaluate(Guess::new(g), target(t));
                let expected = if g == t {
                    Outcome::Correct
                } else if g > t {
                    Outcome::TooHigh
                } else {
                    Outcome::TooLow
                };
                assert_eq!(outcome, expected, "guess {} target {}", g, t);
            }
        }
    }

    #[test]
    fn test_guesses_outside_range_still_compare() {
        assert_eq!(evaluate(Guess::new(-40), target(1)), Outcome::TooLow);
        assert_eq!(evaluate(Guess::new(1_000), target(99)), Outcome::TooHigh);
    }

    #[test]
    fn test_new_round_is_fresh() {
        let round = Round::new(target(30));
        assert_eq!(round.state(), PageState::Fresh);
        assert_eq!(round.state().category(), ResultCategory::NoInput);
        assert_eq!(round.guesses(), 0);
    }

    #[test]
    fn test_submit_keeps_target_and_counts() {
        let mut round = Round::new(target(30));

        assert_eq!(round.submit(Guess::new(60)), Outcome::TooHigh);
        assert_eq!(round.state().category(), ResultCategory::TooHigh);

        assert_eq!(round.submit(Guess::new(30)), Outcome::Correct);
        assert_eq!(round.state(), PageState::Evaluated(Outcome::Correct));

        assert_eq!(round.target(), target(30));
        assert_eq!(round.guesses(), 2);
    }
}
