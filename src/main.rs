//! LexiGuess Server Binary
//!
//! Loads the configuration and word list, then serves the game over HTTP.

use clap::Parser;
use lexiguess::{
    api::server::{init_tracing, ApiServer},
    Dictionary, GameService, LexiConfig, LexiResult, MemorySessionStore,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "lexiguess")]
#[command(about = "LexiGuess word game server", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Server host
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,

    /// Newline-delimited word list
    #[arg(long)]
    word_list: Option<String>,

    /// Allowed CORS origins (comma-separated, use * for all)
    #[arg(long)]
    cors_origins: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Idle session lifetime in seconds
    #[arg(long)]
    session_ttl: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut LexiConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(word_list) = self.word_list {
            config.game.word_list_path = word_list;
        }
        if let Some(origins) = self.cors_origins {
            config.server.allowed_origins = origins.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(timeout) = self.timeout {
            config.server.request_timeout_secs = timeout;
        }
        if let Some(ttl) = self.session_ttl {
            config.game.session_ttl_secs = ttl;
        }
    }
}

#[tokio::main]
async fn main() -> LexiResult<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LexiConfig::from_toml_file(path)?,
        None => LexiConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    init_tracing(&config.logging.filter);

    info!("📂 Loading word list: {}", config.game.word_list_path);
    let dictionary = Arc::new(Dictionary::load_file(&config.game.word_list_path)?);

    let store = Arc::new(MemorySessionStore::new(config.session_ttl(), config.game.max_sessions));
    let game_service = Arc::new(GameService::new(dictionary, store));

    ApiServer::new(config, game_service).run().await
}
