//! HTML rendering for the game page.

use axum::http::StatusCode;
use guess_rules::{ResultCategory, Round, TARGET_MAX, TARGET_MIN, Target};
use tracing::instrument;

/// Everything the game page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    /// Label for the latest result.
    pub category: ResultCategory,
    /// Guesses made against the current target.
    pub guesses: u32,
    /// The target, when it may be shown.
    pub revealed: Option<Target>,
}

impl PageView {
    /// Builds the view for a round.
    ///
    /// The target is revealed once it has been guessed, or always when
    /// `reveal_target` is set.
    #[instrument(skip(round))]
    pub fn from_round(round: &Round, reveal_target: bool) -> Self {
        let category = round.state().category();
        let revealed = (reveal_target || category == ResultCategory::Correct).then(|| round.target());
        Self {
            category,
            guesses: round.guesses(),
            revealed,
        }
    }
}

/// Returns the sentence shown for a result.
pub fn message(category: ResultCategory) -> &'static str {
    match category {
        ResultCategory::NoInput => "I'm thinking of a number. Can you guess it?",
        ResultCategory::Correct => "Correct! You found the number.",
        ResultCategory::TooHigh => "Too high! Try a smaller number.",
        ResultCategory::TooLow => "Too low! Try a bigger number.",
    }
}

/// Renders the game page.
#[instrument]
pub fn render_game(view: &PageView) -> String {
    let revealed = view
        .revealed
        .map(|t| format!("\n    <p class=\"target\">The number is <strong>{}</strong>.</p>", t))
        .unwrap_or_default();
    let attempts = match view.guesses {
        0 => String::new(),
        1 => "\n    <p class=\"attempts\">1 guess so far.</p>".to_string(),
        n => format!("\n    <p class=\"attempts\">{} guesses so far.</p>", n),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Guess the Number</title>
</head>
<body>
  <main>
    <h1>Guess the Number</h1>
    <p>Pick a whole number from {min} to {max}.</p>
    <p class="result" data-result="{category}">{message}</p>{revealed}{attempts}
    <form method="post" action="/guess">
      <input type="number" name="guess" min="{min}" max="{max}" required autofocus>
      <button type="submit">Guess</button>
    </form>
    <p><a href="/">New number</a></p>
  </main>
</body>
</html>
"#,
        min = TARGET_MIN,
        max = TARGET_MAX,
        category = view.category,
        message = message(view.category),
    )
}

/// Renders the page sent with a client error.
#[instrument]
pub fn render_error(status: StatusCode, detail: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{status}</title>
</head>
<body>
  <main>
    <h1>{status}</h1>
    <p class="error">{detail}</p>
    <p><a href="/">Back to the game</a></p>
  </main>
</body>
</html>
"#,
        status = status,
        detail = escape_html(detail),
    )
}

/// Escapes text for use inside HTML element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use guess_rules::Guess;

    fn round(value: i64) -> Round {
        Round::new(Target::new(value).expect("value in range"))
    }

    #[test]
    fn test_fresh_page_hides_target() {
        let view = PageView::from_round(&round(42), false);
        let html = render_game(&view);
        assert!(html.contains(r#"data-result="no_input""#));
        assert!(!html.contains("class=\"target\""));
        assert!(!html.contains("class=\"attempts\""));
        assert!(html.contains(r#"action="/guess""#));
    }

    #[test]
    fn test_correct_reveals_target() {
        let mut round = round(42);
        round.submit(Guess::new(42));
        let html = render_game(&PageView::from_round(&round, false));
        assert!(html.contains(r#"data-result="correct""#));
        assert!(html.contains("<strong>42</strong>"));
        assert!(html.contains("1 guess so far."));
    }

    #[test]
    fn test_reveal_flag_shows_target_early() {
        let view = PageView::from_round(&round(17), true);
        assert_eq!(view.revealed.map(Target::value), Some(17));
    }

    #[test]
    fn test_error_page_escapes_detail() {
        let html = render_error(StatusCode::BAD_REQUEST, "<script>\"x\"</script>");
        assert!(html.contains("400 Bad Request"));
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
