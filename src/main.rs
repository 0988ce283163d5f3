use anyhow::Result;
use clap::Parser;
use tracing::info;

use token_gateway::cache::build_store;
use token_gateway::config::loader::load_config;
use token_gateway::server::server::{start, AppState};
use token_gateway::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "token-gateway.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let service_config = load_config(&args.config)?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build the token store
    // -------------------------------

    let store = build_store(&service_config.cache)?;
    if store.is_none() {
        info!("token caching disabled, every request will hit OneMap");
    }

    // -------------------------------
    // 3. Start the gateway server
    // -------------------------------

    let state = AppState::new(service_config, store)?;
    start(state).await
}
