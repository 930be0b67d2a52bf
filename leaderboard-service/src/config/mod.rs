use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub leaderboard: LeaderboardConfig,
    pub feed: FeedConfig,
    pub action: ActionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardConfig {
    /// Slice size handed to the presentation boundary.
    pub top_n: usize,
    /// How long the "just updated" marker stays active, in ms.
    pub flash_duration_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Interval between simulated feed updates, in ms.
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    /// Simulated action round-trip latency, in ms.
    pub delay_ms: u64,
    /// Points awarded per completed action.
    pub points: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            service: ServiceConfig {
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "leaderboard-service".to_string()),
            },
            leaderboard: LeaderboardConfig {
                top_n: env::var("TOP_N")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("TOP_N must be a valid usize"),
                flash_duration_ms: env::var("FLASH_DURATION_MS")
                    .unwrap_or_else(|_| "700".to_string())
                    .parse()
                    .expect("FLASH_DURATION_MS must be a valid u64"),
            },
            feed: FeedConfig {
                interval_ms: env::var("FEED_INTERVAL_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .expect("FEED_INTERVAL_MS must be a valid u64"),
            },
            action: ActionConfig {
                delay_ms: env::var("ACTION_DELAY_MS")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .expect("ACTION_DELAY_MS must be a valid u64"),
                points: env::var("ACTION_POINTS")
                    .unwrap_or_else(|_| "50".to_string())
                    .parse()
                    .expect("ACTION_POINTS must be a valid f64"),
            },
        })
    }
}
