//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Directory with the static map UI
    pub ui_dir: PathBuf,
    /// Frontend origin allowed by CORS (in addition to localhost)
    pub frontend_url: String,
    /// Map tile token handed to the UI; opaque to the server
    pub mapbox_token: Option<String>,
    /// UTC offset used when formatting dates for the display endpoint
    pub display_offset: FixedOffset,
    /// Base URL the `view` command fetches activities from
    pub server_url: String,
}

impl Config {
    /// Config for tests: in-memory friendly defaults and a fake token.
    pub fn test_default() -> Self {
        Self {
            port: 8222,
            database_path: PathBuf::from(":memory:"),
            ui_dir: PathBuf::from("./ui"),
            frontend_url: "http://localhost:8222".to_string(),
            mapbox_token: Some("test_mapbox_token".to_string()),
            display_offset: utc(),
            server_url: "http://localhost:8222".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8222".to_string())
            .parse()
            .unwrap_or(8222);

        let display_offset = match env::var("DISPLAY_TZ_OFFSET_MINUTES") {
            Ok(raw) => parse_offset_minutes(&raw).ok_or(ConfigError::Invalid {
                name: "DISPLAY_TZ_OFFSET_MINUTES",
                value: raw,
            })?,
            Err(_) => utc(),
        };

        Ok(Self {
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "ran.db".to_string())
                .into(),
            ui_dir: env::var("UI_DIR")
                .unwrap_or_else(|_| "./ui".to_string())
                .into(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            mapbox_token: env::var("MAPBOX_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            display_offset,
            server_url: env::var("RAN_SERVER_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
        })
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse a UTC offset given in minutes east of UTC (e.g. "-420" for UTC-7).
fn parse_offset_minutes(raw: &str) -> Option<FixedOffset> {
    let minutes: i32 = raw.trim().parse().ok()?;
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
