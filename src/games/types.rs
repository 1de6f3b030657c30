//! Game Value Types
//!
//! Words, per-letter marks, feedback rows and the snapshots handed to the API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letters per word
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed before the game is lost
pub const MAX_ATTEMPTS: usize = 6;

/// A normalized (trimmed, uppercased) five-letter word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Trim surrounding whitespace and uppercase.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Normalize `raw` and accept it only if exactly [`WORD_LENGTH`] characters remain.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = Self::normalize(raw);
        if normalized.chars().count() == WORD_LENGTH {
            Some(Self(normalized))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Letters by position.
    pub fn letters(&self) -> [char; WORD_LENGTH] {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, ch) in letters.iter_mut().zip(self.0.chars()) {
            *slot = ch;
        }
        letters
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// Right letter, right position (green)
    Correct,
    /// Letter still unmatched elsewhere in the target (yellow)
    Misplaced,
    /// No unmatched occurrence left in the target (gray)
    #[serde(rename = "wrong")]
    Absent,
}

impl Mark {
    pub fn to_char(self) -> char {
        match self {
            Mark::Correct => '🟩',
            Mark::Misplaced => '🟨',
            Mark::Absent => '⬛',
        }
    }
}

/// Marks for a whole guess, aligned with the guess positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback(pub [Mark; WORD_LENGTH]);

impl Feedback {
    pub const ALL_CORRECT: Self = Self([Mark::Correct; WORD_LENGTH]);

    pub fn marks(&self) -> &[Mark; WORD_LENGTH] {
        &self.0
    }

    pub fn is_win(&self) -> bool {
        *self == Self::ALL_CORRECT
    }

    pub fn to_emoji_string(&self) -> String {
        self.0.iter().map(|m| m.to_char()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// One accepted guess and the feedback it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: Word,
    pub feedback: Feedback,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Won => write!(f, "won"),
            GameStatus::Lost => write!(f, "lost"),
        }
    }
}

/// Raw guess text as submitted by a client: any non-blank string.
///
/// Length and dictionary checks belong to the game itself; this type only
/// guarantees the transport handed over something to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuessInput(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("guess must be a non-empty string")]
pub struct EmptyGuess;

impl GuessInput {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyGuess> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmptyGuess);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GuessInput {
    type Error = EmptyGuess;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<GuessInput> for String {
    fn from(input: GuessInput) -> Self {
        input.0
    }
}

/// Read-only view of a game. The target is only present once the game is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub guesses: Vec<GuessRecord>,
    pub status: GameStatus,
    pub target: Option<Word>,
}

impl GameSnapshot {
    pub fn win(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn lose(&self) -> bool {
        self.status == GameStatus::Lost
    }
}

/// Result of an accepted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub feedback: Feedback,
    pub snapshot: GameSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_parse_normalizes() {
        let word = Word::parse("  crane\n").unwrap();
        assert_eq!(word.as_str(), "CRANE");
        assert_eq!(word.letters(), ['C', 'R', 'A', 'N', 'E']);
    }

    #[test]
    fn test_word_parse_rejects_wrong_length() {
        assert!(Word::parse("cran").is_none());
        assert!(Word::parse("cranes").is_none());
        assert!(Word::parse("   ").is_none());
    }

    #[test]
    fn test_mark_wire_names() {
        let json = serde_json::to_string(&Feedback([
            Mark::Correct,
            Mark::Misplaced,
            Mark::Absent,
            Mark::Absent,
            Mark::Correct,
        ]))
        .unwrap();
        assert_eq!(json, r#"["correct","misplaced","wrong","wrong","correct"]"#);
    }

    #[test]
    fn test_guess_input_rejects_blank() {
        assert_eq!(GuessInput::new("  "), Err(EmptyGuess));
        assert!(serde_json::from_str::<GuessInput>(r#""""#).is_err());
        assert_eq!(GuessInput::new(" crane ").unwrap().as_str(), " crane ");
    }

    #[test]
    fn test_terminal_status() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }
}
