//! API Request/Response Models
//!
//! Wire shapes for the game endpoints.

use crate::games::types::{Feedback, GameSnapshot, GuessInput, GuessOutcome, GuessRecord};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// POST /guess body
#[derive(Debug, Clone, Deserialize)]
pub struct GuessRequest {
    pub guess: GuessInput,
}

/// GET /state response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub guesses: Vec<GuessRecord>,
    pub win: bool,
    pub lose: bool,
    /// Only set once the game is lost
    pub target: Option<String>,
}

impl From<GameSnapshot> for StateResponse {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            win: snapshot.win(),
            lose: snapshot.lose(),
            target: snapshot.target.map(|w| w.to_string()),
            guesses: snapshot.guesses,
        }
    }
}

/// POST /guess success response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub feedback: Feedback,
    pub guesses: Vec<GuessRecord>,
    pub win: bool,
    pub lose: bool,
    pub target: Option<String>,
}

impl From<GuessOutcome> for GuessResponse {
    fn from(outcome: GuessOutcome) -> Self {
        let state = StateResponse::from(outcome.snapshot);
        Self {
            feedback: outcome.feedback,
            guesses: state.guesses,
            win: state.win,
            lose: state.lose,
            target: state.target,
        }
    }
}

/// POST /reset response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}
