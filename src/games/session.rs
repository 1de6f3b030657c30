//! Game Session State Machine
//!
//! One player's game: the hidden target, the guesses made so far and whether
//! the game is still running.

use super::{
    scoring::score,
    types::{GameSnapshot, GameStatus, GuessOutcome, GuessRecord, Word, MAX_ATTEMPTS, WORD_LENGTH},
};
use crate::dictionary::Dictionary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reasons a guess is turned away. None of them touch the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("Game is over. Press Reset to play again.")]
    GameOver,

    #[error("Guess must be exactly {} letters.", WORD_LENGTH)]
    InvalidLength,

    #[error("Not in word list.")]
    UnknownWord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    target: Word,
    guesses: Vec<GuessRecord>,
    status: GameStatus,
    started_at: DateTime<Utc>,
}

impl GameSession {
    /// Begin a new game with a target drawn from `dictionary`.
    pub fn start(dictionary: &Dictionary) -> Self {
        Self::with_target(dictionary.pick_random().clone())
    }

    pub fn with_target(target: Word) -> Self {
        Self {
            target,
            guesses: Vec::with_capacity(MAX_ATTEMPTS),
            status: GameStatus::InProgress,
            started_at: Utc::now(),
        }
    }

    /// Throw away the current game, finished or not, and start over.
    pub fn restart(&mut self, dictionary: &Dictionary) {
        *self = Self::start(dictionary);
    }

    /// Score a guess and advance the game.
    pub fn submit_guess(&mut self, raw: &str, dictionary: &Dictionary) -> Result<GuessOutcome, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::GameOver);
        }

        let word = Word::parse(raw).ok_or(GuessError::InvalidLength)?;
        if !dictionary.contains_word(&word) {
            return Err(GuessError::UnknownWord);
        }

        let feedback = score(&word, &self.target);
        let won = word == self.target;
        self.guesses.push(GuessRecord { word, feedback });

        if won {
            self.status = GameStatus::Won;
        } else if self.guesses.len() >= MAX_ATTEMPTS {
            self.status = GameStatus::Lost;
        }

        Ok(GuessOutcome {
            feedback,
            snapshot: self.snapshot(),
        })
    }

    /// Current state. The target is revealed only after a loss.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            guesses: self.guesses.clone(),
            status: self.status,
            target: (self.status == GameStatus::Lost).then(|| self.target.clone()),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.guesses.len())
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
