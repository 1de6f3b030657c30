pub mod scoring;
pub mod service;
pub mod session;
pub mod types;

pub use scoring::score;
pub use service::{GameService, ServiceError, ServiceResult};
pub use session::{GameSession, GuessError};
pub use types::*;
