//! Game HTTP API
//! 
//! JSON endpoints for playing LexiGuess in a browser, plus the game page itself.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
