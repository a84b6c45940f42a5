use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Lichess,
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub source: SourceKind,
    pub lichess_base_url: String,
    pub lichess_timeout: Duration,
    /// Idle gate sessions older than this are dropped.
    pub session_ttl: Duration,
    /// Presentation hints handed to the client; the server never waits on them.
    pub reply_delay_ms: u64,
    pub revert_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let source = match env::var("PUZZLE_SOURCE")
            .unwrap_or_else(|_| "lichess".to_string())
            .to_lowercase()
            .as_str()
        {
            "lichess" => SourceKind::Lichess,
            "file" => {
                let path = env::var("PUZZLE_FILE")
                    .context("PUZZLE_FILE must be set when PUZZLE_SOURCE=file")?;
                SourceKind::File(PathBuf::from(path))
            }
            other => bail!("Unknown PUZZLE_SOURCE '{other}' (expected 'lichess' or 'file')"),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8000),
            source,
            lichess_base_url: env::var("LICHESS_BASE_URL")
                .unwrap_or_else(|_| "https://lichess.org".to_string()),
            lichess_timeout: Duration::from_secs(parse_or("LICHESS_TIMEOUT_SECS", 10)),
            session_ttl: Duration::from_secs(parse_or("SESSION_TTL_SECS", 3600)),
            reply_delay_ms: parse_or("REPLY_DELAY_MS", 500),
            revert_delay_ms: parse_or("REVERT_DELAY_MS", 600),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
