//! Target storage keyed by player session.

use crate::error::NoActiveGame;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use guess_rules::{Guess, Round, Target};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Cookie that carries the session id.
pub const SESSION_COOKIE: &str = "guess_session";

/// Length of a session id in hex digits.
const SESSION_ID_LEN: usize = 32;

/// Unique identifier for a browser session.
pub type SessionId = String;

/// Where a round lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The single process-wide slot.
    Shared,
    /// A slot owned by one browser session.
    Session(SessionId),
}

/// Mints a fresh random session id.
#[instrument]
pub fn new_session_id() -> SessionId {
    format!("{:032x}", rand::rng().random::<u128>())
}

/// Reads the session id from the request cookies.
///
/// Values that do not look like an id this server minted are ignored.
#[instrument(skip(headers))]
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id.trim())
        .find(|id| is_session_id(id))
        .map(str::to_string)
}

fn is_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.chars().all(|c| c.is_ascii_hexdigit())
}

/// Builds the `Set-Cookie` value for a session id.
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// Default cap on concurrently stored session rounds.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
struct Entry {
    round: Round,
    touched: u64,
}

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<Slot, Entry>,
    clock: u64,
}

impl Slots {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn session_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|slot| matches!(slot, Slot::Session(_)))
            .count()
    }

    /// Drops the session slot that was used least recently.
    fn evict_oldest_session(&mut self) -> Option<Slot> {
        let oldest = self
            .entries
            .iter()
            .filter(|(slot, _)| matches!(slot, Slot::Session(_)))
            .min_by_key(|(_, entry)| entry.touched)
            .map(|(slot, _)| slot.clone())?;
        self.entries.remove(&oldest);
        Some(oldest)
    }
}

/// Holds the current round for every slot.
///
/// Session slots are capped; starting a round for a new session when the
/// cap is reached drops the least recently used session. The shared slot
/// is never evicted. Cloning shares the underlying map.
#[derive(Debug, Clone)]
pub struct TargetStore {
    slots: Arc<Mutex<Slots>>,
    max_sessions: usize,
}

impl Default for TargetStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl TargetStore {
    /// Creates an empty store with the default session cap.
    #[instrument]
    pub fn new() -> Self {
        info!(max_sessions = DEFAULT_MAX_SESSIONS, "Creating target store");
        Self::default()
    }

    /// Creates an empty store holding at most `max_sessions` session rounds.
    ///
    /// A cap of zero is treated as one.
    #[instrument]
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots::default())),
            max_sessions: max_sessions.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the session cap.
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Starts a new round in the slot, replacing any previous one.
    #[instrument(skip(self))]
    pub fn reset(&self, slot: Slot, target: Target) -> Round {
        let round = Round::new(target);
        let mut slots = self.lock();

        let is_new_session = matches!(slot, Slot::Session(_)) && !slots.entries.contains_key(&slot);
        if is_new_session && slots.session_count() >= self.max_sessions {
            if let Some(evicted) = slots.evict_oldest_session() {
                debug!(?evicted, max_sessions = self.max_sessions, "Evicted idle session");
            }
        }

        let touched = slots.tick();
        let replaced = slots.entries.insert(
            slot,
            Entry {
                round: round.clone(),
                touched,
            },
        );
        debug!(replaced = replaced.is_some(), "Round started");
        round
    }

    /// Evaluates a guess against the slot's round.
    ///
    /// Returns the updated round.
    #[instrument(skip(self))]
    pub fn submit(&self, slot: &Slot, guess: Guess) -> Result<Round, NoActiveGame> {
        let mut slots = self.lock();
        let touched = slots.tick();
        let entry = slots.entries.get_mut(slot).ok_or_else(|| {
            debug!("No round for slot");
            NoActiveGame
        })?;
        entry.round.submit(guess);
        entry.touched = touched;
        Ok(entry.round.clone())
    }

    /// Returns a copy of the slot's round.
    #[instrument(skip(self))]
    pub fn get(&self, slot: &Slot) -> Option<Round> {
        self.lock().entries.get(slot).map(|entry| entry.round.clone())
    }

    /// Returns how many slots hold a round.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true if no slot holds a round.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use guess_rules::{Outcome, PageState};

    fn target(value: i64) -> Target {
        Target::new(value).expect("value in range")
    }

    #[test]
    fn test_submit_without_round_fails() {
        let store = TargetStore::new();
        assert_eq!(store.submit(&Slot::Shared, Guess::new(5)), Err(NoActiveGame));
    }

    #[test]
    fn test_reset_then_submit() {
        let store = TargetStore::new();
        store.reset(Slot::Shared, target(50));

        let round = store.submit(&Slot::Shared, Guess::new(75)).expect("round exists");
        assert_eq!(round.state(), PageState::Evaluated(Outcome::TooHigh));
        assert_eq!(round.guesses(), 1);
        assert_eq!(round.target(), target(50));
    }

    #[test]
    fn test_reset_clears_progress() {
        let store = TargetStore::new();
        store.reset(Slot::Shared, target(50));
        store.submit(&Slot::Shared, Guess::new(10)).expect("round exists");

        let round = store.reset(Slot::Shared, target(20));
        assert_eq!(round.state(), PageState::Fresh);
        assert_eq!(round.guesses(), 0);
        assert_eq!(store.get(&Slot::Shared), Some(round));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = TargetStore::new();
        let alice = Slot::Session(new_session_id());
        let bob = Slot::Session(new_session_id());

        store.reset(alice.clone(), target(10));
        store.reset(bob.clone(), target(90));

        let outcome = store.submit(&alice, Guess::new(10)).expect("alice round");
        assert_eq!(outcome.state(), PageState::Evaluated(Outcome::Correct));
        assert_eq!(store.get(&bob).map(|r| r.state()), Some(PageState::Fresh));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_session_id_shape() {
        let id = new_session_id();
        assert_eq!(id.len(), SESSION_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_session_id());
    }

    #[test]
    fn test_cookie_parsing() {
        let id = new_session_id();
        let mut headers = HeaderMap::new();
        let cookie = format!("theme=dark; {}={}", SESSION_COOKIE, id);
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).expect("ascii cookie"));
        assert_eq!(session_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_cookie_skips_malformed_duplicate() {
        let id = new_session_id();
        let mut headers = HeaderMap::new();
        let cookie = format!("{0}=stale; {0}={1}", SESSION_COOKIE, id);
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).expect("ascii cookie"));
        assert_eq!(session_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_session_slots_are_capped() {
        let store = TargetStore::with_capacity(3);
        store.reset(Slot::Shared, target(5));
        for _ in 0..50 {
            store.reset(Slot::Session(new_session_id()), target(10));
        }
        // Three sessions plus the shared slot.
        assert_eq!(store.len(), 4);
        assert!(store.get(&Slot::Shared).is_some());
    }

    #[test]
    fn test_eviction_drops_least_recently_used() {
        let store = TargetStore::with_capacity(2);
        let first = Slot::Session(new_session_id());
        let second = Slot::Session(new_session_id());
        store.reset(first.clone(), target(10));
        store.reset(second.clone(), target(20));

        // Guessing keeps the first session fresh.
        store.submit(&first, Guess::new(10)).expect("first round");

        let third = Slot::Session(new_session_id());
        store.reset(third.clone(), target(30));
        assert!(store.get(&first).is_some());
        assert!(store.get(&second).is_none());
        assert!(store.get(&third).is_some());
        assert_eq!(store.submit(&second, Guess::new(20)), Err(NoActiveGame));
    }

    #[test]
    fn test_reset_of_known_session_does_not_evict() {
        let store = TargetStore::with_capacity(2);
        let first = Slot::Session(new_session_id());
        let second = Slot::Session(new_session_id());
        store.reset(first.clone(), target(10));
        store.reset(second.clone(), target(20));
        store.reset(first.clone(), target(30));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&second).map(|r| r.target()), Some(target(20)));
    }

    #[test]
    fn test_cookie_rejects_foreign_values() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("guess_session=not-ours"));
        assert_eq!(session_from_headers(&headers), None);
        assert_eq!(session_from_headers(&HeaderMap::new()), None);
    }
}
