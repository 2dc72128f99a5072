use anyhow::Context;
use dotenvy::dotenv;
use opremote_ws::{DeviceLink, WsConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod modes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let mut cfg = WsConfig::from_env();
    if let Some(url) = std::env::args().nth(1) {
        cfg.url = url;
    }

    info!(url = %cfg.url, "connecting to device");
    let link = DeviceLink::connect(&cfg)
        .await
        .with_context(|| format!("could not reach device at {}", cfg.url))?;
    println!("Connected to WebSocket server");

    let mode = modes::prompt_mode().await?;
    modes::run(mode, link).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,tungstenite=warn"))
        .unwrap();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
