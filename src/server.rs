//! HTTP routes and server lifecycle.

use crate::config::{ServerConfig, TargetScope};
use crate::error::{AppError, NoActiveGame};
use crate::page::{self, PageView};
use crate::session::{self, Slot, TargetStore};
use axum::body::Body;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, Request};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use guess_rules::{Guess, InvalidGuessInput, NumberSource, SeededSource, ThreadRngSource};
use serde::Deserialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Form posted by the guess page.
#[derive(Debug, Clone, Deserialize)]
pub struct GuessForm {
    /// Raw text of the guess field.
    pub guess: Option<String>,
}

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    store: TargetStore,
    source: Arc<dyn NumberSource>,
    scope: TargetScope,
    reveal_target: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("scope", &self.scope)
            .field("reveal_target", &self.reveal_target)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Creates state around an explicit number source.
    #[instrument(skip(source))]
    pub fn new(source: Arc<dyn NumberSource>, scope: TargetScope, reveal_target: bool) -> Self {
        Self {
            store: TargetStore::new(),
            source,
            scope,
            reveal_target,
        }
    }

    /// Creates state as described by the configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &ServerConfig) -> Self {
        let source: Arc<dyn NumberSource> = match config.seed() {
            Some(seed) => {
                info!(seed, "Using seeded number source");
                Arc::new(SeededSource::new(*seed))
            }
            None => Arc::new(ThreadRngSource),
        };
        Self::new(source, *config.scope(), *config.reveal_target())
            .with_max_sessions(*config.max_sessions())
    }

    /// Replaces the store with an empty one capped at `max_sessions`.
    #[instrument(skip(self))]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.store = TargetStore::with_capacity(max_sessions);
        self
    }

    /// Returns the target store.
    pub fn store(&self) -> &TargetStore {
        &self.store
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_page))
        .route("/guess", post(submit_guess))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Draws a new target for the caller and shows a fresh page.
#[instrument(skip_all)]
async fn welcome_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (slot, minted) = match state.scope {
        TargetScope::Shared => (Slot::Shared, None),
        TargetScope::Session => match session::session_from_headers(&headers) {
            Some(id) => (Slot::Session(id), None),
            None => {
                let id = session::new_session_id();
                debug!("Minted new session");
                (Slot::Session(id.clone()), Some(id))
            }
        },
    };

    let target = state.source.generate();
    let round = state.store.reset(slot, target);
    info!(number = %round.target(), scope = %state.scope, "New target drawn");

    let html = Html(page::render_game(&PageView::from_round(&round, state.reveal_target)));
    match minted {
        Some(id) => ([(SET_COOKIE, session::session_cookie(&id))], html).into_response(),
        None => html.into_response(),
    }
}

/// Evaluates a submitted guess against the caller's target.
#[instrument(skip_all)]
async fn submit_guess(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<GuessForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let raw = match form {
        Ok(Form(form)) => form.guess,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable guess form");
            return Err(InvalidGuessInput::Missing.into());
        }
    };
    let guess = Guess::parse(raw.as_deref())?;

    let slot = match state.scope {
        TargetScope::Shared => Slot::Shared,
        TargetScope::Session => {
            Slot::Session(session::session_from_headers(&headers).ok_or(NoActiveGame)?)
        }
    };

    let round = state.store.submit(&slot, guess)?;
    info!(
        %guess,
        result = %round.state().category(),
        guesses = round.guesses(),
        scope = %state.scope,
        "Guess evaluated"
    );

    Ok(Html(page::render_game(&PageView::from_round(
        &round,
        state.reveal_target,
    ))))
}

/// Binds the listener and serves until Ctrl+C.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        scope = %config.scope(),
        "Server ready at http://{}:{}/",
        config.host(),
        config.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
