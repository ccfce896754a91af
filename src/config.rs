use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use url::Url;

use crate::constants::*;
use crate::elapsed::parse_origin;
use crate::error::ConfigError;

/// Trophy counter, hero carousel and random reveals in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "mausoleum", version)]
pub struct Args {
    /// Directory holding the JSON content collections
    #[arg(short, long, default_value = "content")]
    pub content_dir: PathBuf,

    /// Origin passed to embedded players
    #[arg(long, default_value = DEFAULT_PAGE_ORIGIN)]
    pub page_origin: String,

    /// Instant the elapsed counter starts from (RFC 3339)
    #[arg(long, default_value = TROPHY_ORIGIN)]
    pub since: String,

    /// Seconds between hero images
    #[arg(long, default_value_t = CAROUSEL_INTERVAL.as_secs())]
    pub carousel_secs: u64,

    /// Milliseconds between counter refreshes
    #[arg(long, default_value_t = ELAPSED_TICK.as_millis() as u64)]
    pub tick_ms: u64,

    /// Where the mute preference is kept
    #[arg(long, default_value = "mausoleum-prefs.json")]
    pub prefs: PathBuf,

    /// Start muted, overriding the stored preference
    #[arg(long)]
    pub muted: bool,

    /// Tear the page down after this many seconds
    #[arg(long)]
    pub run_for: Option<u64>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Validated runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub content_dir: PathBuf,
    pub page_origin: String,
    pub since: DateTime<Utc>,
    pub carousel_interval: Duration,
    pub tick_interval: Duration,
    pub prefs: PathBuf,
    pub force_muted: bool,
    pub run_for: Option<Duration>,
}

impl Args {
    pub fn settings(&self, now: DateTime<Utc>) -> Result<Settings, ConfigError> {
        let since = parse_origin(&self.since)?;
        if since > now {
            return Err(ConfigError::OriginInFuture(self.since.clone()));
        }
        if self.carousel_secs == 0 {
            return Err(ConfigError::ZeroInterval("carousel-secs"));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroInterval("tick-ms"));
        }

        Ok(Settings {
            content_dir: self.content_dir.clone(),
            page_origin: normalize_page_origin(&self.page_origin)?,
            since,
            carousel_interval: Duration::from_secs(self.carousel_secs),
            tick_interval: Duration::from_millis(self.tick_ms),
            prefs: self.prefs.clone(),
            force_muted: self.muted,
            run_for: self.run_for.map(Duration::from_secs),
        })
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "mausoleum=info",
            1 => "mausoleum=debug",
            _ => "mausoleum=trace",
        }
    }
}

// Scheme, host and port only, as a browser reports `location.origin`
fn normalize_page_origin(value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value).map_err(|_| ConfigError::InvalidPageOrigin(value.to_string()))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(ConfigError::InvalidPageOrigin(value.to_string()));
    }
    Ok(origin.ascii_serialization())
}
