//! Game Service
//!
//! Owns every mutation of a player's session. Each call takes the session's
//! lock, loads the game from the store, applies one transition and writes the
//! result back, so two requests for the same session never interleave.

use super::{
    session::{GameSession, GuessError},
    types::{GameSnapshot, GuessInput, GuessOutcome},
};
use crate::{
    dictionary::Dictionary,
    session_store::{SessionId, SessionStore, StoreError},
};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error("session store failure: {0}")]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct GameService {
    dictionary: Arc<Dictionary>,
    store: Arc<dyn SessionStore>,
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl GameService {
    pub fn new(dictionary: Arc<Dictionary>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            dictionary,
            store,
            locks: DashMap::new(),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Current game for `id`. A game is started if the player has none;
    /// finished games stay readable until the next reset or page load.
    pub async fn state(&self, id: &SessionId) -> ServiceResult<GameSnapshot> {
        self.with_session(id, |current| match current {
            Some(session) => {
                let snapshot = session.snapshot();
                (None, snapshot)
            }
            None => {
                let session = self.start_game(id);
                let snapshot = session.snapshot();
                (Some(session), snapshot)
            }
        })
        .await
    }

    /// Page-load read: like [`state`](Self::state), but a finished game is
    /// replaced by a fresh one.
    pub async fn open(&self, id: &SessionId) -> ServiceResult<GameSnapshot> {
        self.with_session(id, |current| match current {
            Some(session) if !session.is_terminal() => {
                let snapshot = session.snapshot();
                (None, snapshot)
            }
            _ => {
                let session = self.start_game(id);
                let snapshot = session.snapshot();
                (Some(session), snapshot)
            }
        })
        .await
    }

    /// Submit a guess. Rejected guesses leave the stored session untouched.
    pub async fn guess(&self, id: &SessionId, input: &GuessInput) -> ServiceResult<GuessOutcome> {
        let outcome = self
            .with_session(id, |current| {
                let mut session = current.unwrap_or_else(|| self.start_game(id));
                match session.submit_guess(input.as_str(), &self.dictionary) {
                    Ok(outcome) => {
                        debug!(session = %id, feedback = %outcome.feedback, "Guess accepted");
                        if session.is_terminal() {
                            info!(
                                session = %id,
                                status = %session.status(),
                                attempts = session.guesses().len(),
                                "Game finished"
                            );
                        }
                        (Some(session), Ok(outcome))
                    }
                    Err(e) => {
                        debug!(session = %id, "Guess rejected: {}", e);
                        (None, Err(e))
                    }
                }
            })
            .await?;
        Ok(outcome?)
    }

    /// Replace the session with a brand new game.
    pub async fn reset(&self, id: &SessionId) -> ServiceResult<GameSnapshot> {
        self.with_session(id, |_| {
            let session = self.start_game(id);
            let snapshot = session.snapshot();
            (Some(session), snapshot)
        })
        .await
    }

    fn start_game(&self, id: &SessionId) -> GameSession {
        let session = GameSession::start(&self.dictionary);
        info!(session = %id, started_at = %session.started_at(), "New game started");
        session
    }

    /// Run one transition under the session's lock. `op` returns the session
    /// to persist (if it changed) and the value handed back to the caller.
    async fn with_session<T>(
        &self,
        id: &SessionId,
        op: impl FnOnce(Option<GameSession>) -> (Option<GameSession>, T),
    ) -> ServiceResult<T> {
        let guard = self.acquire(id).await;

        let result: ServiceResult<T> = async {
            let current = self.store.get(id).await?;
            let (next, value) = op(current);
            if let Some(session) = next {
                self.store.put(id.clone(), session).await?;
            }
            Ok(value)
        }
        .await;

        drop(guard);
        self.release(id);
        result
    }

    async fn acquire(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(id.clone()).or_default().value().clone();
        lock.lock_owned().await
    }

    /// Forget the lock once nobody holds or waits on it.
    fn release(&self, id: &SessionId) {
        self.locks.remove_if(id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        games::types::{GameStatus, Word, MAX_ATTEMPTS},
        session_store::MemorySessionStore,
    };

    const WORDS: [&str; 8] = ["CRANE", "SLATE", "ABOUT", "PIOUS", "MOUNT", "GHOST", "LOYAL", "ALLOY"];

    async fn service_with_target(target: &str) -> (Arc<GameService>, Arc<MemorySessionStore>, SessionId) {
        let dictionary = Arc::new(Dictionary::from_words(WORDS).unwrap());
        let store = Arc::new(MemorySessionStore::default());
        let service = Arc::new(GameService::new(dictionary, store.clone()));
        let id = SessionId::generate();
        let session = GameSession::with_target(Word::parse(target).unwrap());
        store.put(id.clone(), session).await.unwrap();
        (service, store, id)
    }

    fn guess(raw: &str) -> GuessInput {
        GuessInput::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_state_starts_missing_game() {
        let dictionary = Arc::new(Dictionary::from_words(WORDS).unwrap());
        let store = Arc::new(MemorySessionStore::default());
        let service = GameService::new(dictionary, store.clone());
        let id = SessionId::generate();

        let snapshot = service.state(&id).await.unwrap();

        assert_eq!(snapshot.status, GameStatus::InProgress);
        assert!(snapshot.guesses.is_empty());
        assert!(store.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_state_is_idempotent() {
        let (service, _store, id) = service_with_target("CRANE").await;
        service.guess(&id, &guess("SLATE")).await.unwrap();

        let first = service.state(&id).await.unwrap();
        let second = service.state(&id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_lost_game_stays_visible_until_open() {
        let (service, _store, id) = service_with_target("CRANE").await;
        for miss in ["SLATE", "ABOUT", "PIOUS", "MOUNT", "GHOST", "LOYAL"] {
            service.guess(&id, &guess(miss)).await.unwrap();
        }

        let state = service.state(&id).await.unwrap();
        assert!(state.lose());
        assert_eq!(state.target.as_ref().map(Word::as_str), Some("CRANE"));

        let opened = service.open(&id).await.unwrap();
        assert_eq!(opened.status, GameStatus::InProgress);
        assert!(opened.guesses.is_empty());
        assert_eq!(opened.target, None);
    }

    #[tokio::test]
    async fn test_open_keeps_running_game() {
        let (service, _store, id) = service_with_target("CRANE").await;
        service.guess(&id, &guess("SLATE")).await.unwrap();

        let opened = service.open(&id).await.unwrap();
        assert_eq!(opened.guesses.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_guess_is_not_persisted() {
        let (service, store, id) = service_with_target("CRANE").await;

        let err = service.guess(&id, &guess("ZZZZZ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Guess(GuessError::UnknownWord)));
        let err = service.guess(&id, &guess("CRA")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Guess(GuessError::InvalidLength)));

        assert!(store.get(&id).await.unwrap().unwrap().guesses().is_empty());
    }

    #[tokio::test]
    async fn test_guess_after_win_is_game_over() {
        let (service, store, id) = service_with_target("CRANE").await;
        let outcome = service.guess(&id, &guess("crane")).await.unwrap();
        assert!(outcome.snapshot.win());

        let err = service.guess(&id, &guess("SLATE")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Guess(GuessError::GameOver)));
        assert_eq!(store.get(&id).await.unwrap().unwrap().guesses().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_after_win() {
        let (service, _store, id) = service_with_target("CRANE").await;
        service.guess(&id, &guess("CRANE")).await.unwrap();

        let snapshot = service.reset(&id).await.unwrap();
        assert_eq!(snapshot.status, GameStatus::InProgress);
        assert!(snapshot.guesses.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_guesses_are_serialized() {
        let (service, store, id) = service_with_target("CRANE").await;

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let service = service.clone();
                let id = id.clone();
                tokio::spawn(async move { service.guess(&id, &guess("SLATE")).await })
            })
            .collect();

        let mut accepted = 0;
        let mut game_over = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(ServiceError::Guess(GuessError::GameOver)) => game_over += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(accepted, MAX_ATTEMPTS);
        assert_eq!(game_over, 20 - MAX_ATTEMPTS);
        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.guesses().len(), MAX_ATTEMPTS);
        assert_eq!(stored.status(), GameStatus::Lost);
        assert!(service.locks.is_empty());
    }
}
