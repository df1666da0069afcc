use floorsniper::infrastructure::bootstrap::build_sniper;
use floorsniper::infrastructure::config::settings::Config;
use tokio::signal;
use tracing::{error, info};

const CONFIG_PATH_VAR: &str = "FLOORSNIPER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let config = match Config::load_optional(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!(config = %path, "floorsniper starting");

    let mut sniper = match build_sniper(&config) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to start");
            std::process::exit(1);
        }
    };

    tokio::select! {
        () = sniper.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("floorsniper stopped");
}
