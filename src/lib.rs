//! LexiGuess - five-letter word guessing game server
//!
//! A player has six attempts to find a hidden word. Each guess is scored
//! letter by letter (correct, misplaced, absent) and the game state lives in a
//! per-player session addressed by a cookie.

pub mod api;
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod games;
pub mod session_store;

pub use config::LexiConfig;
pub use dictionary::Dictionary;
pub use errors::{LexiError, LexiResult};
pub use games::{GameService, GameSession};
pub use session_store::{MemorySessionStore, SessionId, SessionStore};
