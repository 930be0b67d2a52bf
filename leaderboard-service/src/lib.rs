pub mod config;
pub mod models;
pub mod services;

pub use config::Config;
pub use models::ScoredEntity;
pub use services::{LeaderboardSession, MockApi, MockScoreFeed, RankedSet, ScoreFeed};
