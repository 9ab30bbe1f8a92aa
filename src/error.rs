//! Request errors and their HTTP responses.

use crate::page;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use derive_more::{Display, Error, From};
use guess_rules::InvalidGuessInput;
use tracing::warn;

/// A guess arrived for a slot that has no target yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("No game in progress; start one by visiting the home page")]
pub struct NoActiveGame;

/// Everything a game request can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum AppError {
    /// The guess field was missing or not an integer.
    #[display("Invalid guess: {}", _0)]
    InvalidGuess(InvalidGuessInput),

    /// There is no round to evaluate the guess against.
    #[display("{}", _0)]
    NoActiveGame(NoActiveGame),
}

impl AppError {
    /// Returns the status code sent to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidGuess(_) => StatusCode::BAD_REQUEST,
            Self::NoActiveGame(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = %status, error = %self, "Rejecting request");
        (status, Html(page::render_error(status, &self.to_string()))).into_response()
    }
}
