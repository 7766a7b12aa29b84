//! Paywatch - observability surface for the checkout test harness.
//!
//! Serves the pull-based reporting endpoints over HTTP.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use paywatch::{api, simulate};
use paywatch_core::TestObservability;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "paywatch", version, about = "Reporting surface for checkout test metrics")]
struct Cli {
    /// Address to bind the reporting surface to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for /metrics, /dashboard, and /health
    #[arg(long, default_value_t = 9095)]
    port: u16,

    /// Seed the store with a simulated checkout run
    #[arg(long)]
    simulate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paywatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let observability = TestObservability::new();
    if cli.simulate {
        info!("seeding simulated checkout run");
        simulate::seed(&observability);
    }

    let app = api::api_router(observability);
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "paywatch reporting surface listening");

    axum::serve(listener, app).await?;
    Ok(())
}
