// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ran command line.
//!
//! `add` imports a GPX file, `api` serves activities to the map UI, and
//! `view` prints an activity's statistics and splits to the terminal.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ran::{
    config::Config,
    db::ActivityStore,
    display::{panel, StatsFormatter},
    services::{ActivityClient, ActivityImporter},
    AppState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ran", about = "Personal running log", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a GPX file into the activity store
    Add {
        /// Path to the GPX file
        #[arg(long)]
        gpx: PathBuf,
    },
    /// Serve the activity API and map UI
    Api,
    /// Print an activity's statistics and splits
    View {
        /// Activity id (defaults to the first activity)
        #[arg(long)]
        id: Option<i64>,
        /// Server base URL (overrides RAN_SERVER_URL)
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Command::Api));

    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Command::Add { gpx } => add(config, gpx).await,
        Command::Api => serve(config).await,
        Command::View { id, server } => view(config, id, server).await,
    }
}

async fn add(config: Config, gpx: PathBuf) -> anyhow::Result<()> {
    let store = ActivityStore::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    let importer = ActivityImporter::new(store);

    let result = importer
        .import_file(&gpx)
        .await
        .with_context(|| format!("Failed to import {}", gpx.display()))?;

    tracing::info!(
        activity_id = result.id,
        name = %result.name,
        replaced = result.replaced,
        "Activity stored"
    );
    println!("Activity added successfully");
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(port = config.port, "Starting Ran API");

    let store = ActivityStore::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    let count = store.count_activities().await?;
    tracing::info!(
        path = %config.database_path.display(),
        activities = count,
        "Activity store opened"
    );
    if config.mapbox_token.is_none() {
        tracing::warn!("MAPBOX_TOKEN not set; /token will fail");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState { config, store });
    let app = ran::routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn view(config: Config, id: Option<i64>, server: Option<String>) -> anyhow::Result<()> {
    let client = ActivityClient::new(server.unwrap_or(config.server_url));
    let formatter = StatsFormatter::local();

    let rendered = client.render_activity(id, &formatter).await?;
    print!("{}", panel::render_text(&rendered));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Initialize logging: structured JSON for the server, compact text on
/// stderr for the one-shot commands.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if json {
                tracing_subscriber::EnvFilter::new("ran=debug,info")
            } else {
                tracing_subscriber::EnvFilter::new("ran=info,warn")
            }
        });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
