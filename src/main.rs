//! Seattle taxi skill server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                   TAXI SKILL                          │
//!   Voice platform     │  ┌────────┐   ┌──────────────┐   ┌─────────────────┐ │
//!   ───────────────────┼─▶│  http  │──▶│ interceptors │──▶│   dispatcher    │ │
//!   RequestEnvelope    │  │ server │   │  (request)   │   │ first match of  │ │
//!                      │  └────────┘   └──────────────┘   │ Launch, Order,  │ │
//!                      │                                   │ Resumed, Help,  │ │
//!                      │                                   │ Cancel, Ended,  │ │
//!                      │                                   │ Reflector       │ │
//!                      │                                   └───────┬─────────┘ │
//!                      │                            Err ┌─────────┤           │
//!                      │                                ▼         │ Ok        │
//!                      │                        ┌──────────────┐  │           │
//!                      │                        │error handler │  │           │
//!                      │                        └──────┬───────┘  │           │
//!                      │                               ▼          ▼           │
//!   ResponseEnvelope   │  ┌────────┐           ┌──────────────────────┐       │
//!   ◀──────────────────┼──│  http  │◀──────────│ interceptors (resp.) │       │
//!                      │  └────────┘           └──────────────────────┘       │
//!                      └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use seattle_taxi_skill::config::load_or_default;
use seattle_taxi_skill::observability::{logging, metrics};
use seattle_taxi_skill::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "seattle-taxi-skill")]
#[command(about = "Voice skill backend for booking a ride to the Space Needle", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "seattle-taxi-skill starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        skill_id = ?config.skill.skill_id,
        policy = %config.verification.policy_name,
        confidence_level = config.verification.confidence_level,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    let mut serve = tokio::spawn(server.run(listener, server_shutdown));
    tokio::select! {
        result = &mut serve => result??,
        _ = shutdown.trigger_on_ctrl_c() => serve.await??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
