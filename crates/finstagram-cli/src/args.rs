//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use finstagram_app::AppConfig;

/// Finstagram terminal client
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "finstagram")]
#[command(about = "Terminal client for the Finstagram social feed")]
#[command(version)]
pub struct Args {
    /// Backend base URL.
    #[arg(long, env = "FINSTAGRAM_API_URL", default_value = "http://localhost:5000")]
    pub api_url: String,

    /// File holding the persisted session.
    #[arg(long, env = "FINSTAGRAM_STATE", default_value = "finstagram-state.redb")]
    pub state_path: PathBuf,

    /// Keep the session in memory only.
    #[arg(long)]
    pub ephemeral: bool,

    /// How long status messages stay visible.
    #[arg(long, default_value_t = 3000)]
    pub toast_ttl_ms: u64,

    /// Delay between message history fetches for the open conversation.
    #[arg(long, default_value_t = 3000)]
    pub poll_interval_ms: u64,

    /// Housekeeping tick driving timers.
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Per-request timeout. Unset leaves the transport default.
    #[arg(long)]
    pub request_timeout_ms: Option<u64>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Timing configuration for the App.
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            toast_ttl: Duration::from_millis(self.toast_ttl_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    /// Runtime tick period.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app_defaults() {
        let args = Args::try_parse_from(["finstagram"]).unwrap();

        assert_eq!(args.app_config(), AppConfig::default());
        assert_eq!(args.tick(), Duration::from_millis(100));
        assert_eq!(args.request_timeout(), None);
        assert!(!args.ephemeral);
    }

    #[test]
    fn flags_override_timing() {
        let args = Args::try_parse_from([
            "finstagram",
            "--ephemeral",
            "--poll-interval-ms",
            "500",
            "--request-timeout-ms",
            "2000",
        ])
        .unwrap();

        assert!(args.ephemeral);
        assert_eq!(args.app_config().poll_interval, Duration::from_millis(500));
        assert_eq!(args.request_timeout(), Some(Duration::from_secs(2)));
    }
}
