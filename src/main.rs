use std::net::SocketAddr;

use chirp::{make_router, run_app, Config};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return;
        }
    };
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let router = make_router();
    info!("Server started on {}", addr);
    match run_app(router, addr, config).await {
        Ok(_) => (),
        Err(e) => error!("Error: {}", e),
    }
}
