// In-process stand-in for the remote leaderboard backend. The real system
// fetches the batch over the network; here the batch is a fixed roster and
// the action round-trip is a fixed score bump behind a simulated delay.

use crate::models::ScoredEntity;
use crate::services::session::{ActionSource, SnapshotSource};
use async_trait::async_trait;
use std::time::Duration;

pub struct MockApi {
    roster: Vec<ScoredEntity>,
    action_delay: Duration,
    action_points: f64,
}

impl MockApi {
    pub fn new(roster: Vec<ScoredEntity>, action_delay: Duration, action_points: f64) -> Self {
        Self {
            roster,
            action_delay,
            action_points,
        }
    }

    pub fn roster(&self) -> &[ScoredEntity] {
        &self.roster
    }

    /// The development roster, matching the original fixture data.
    pub fn default_roster() -> Vec<ScoredEntity> {
        [
            ("user-1", "Alice", 1050.0),
            ("user-2", "Bob", 980.0),
            ("user-3", "Charlie", 975.0),
            ("user-4", "David", 850.0),
            ("user-5", "Eve", 845.0),
            ("user-6", "Frank", 760.0),
            ("user-7", "Grace", 755.0),
            ("user-8", "Heidi", 650.0),
            ("user-9", "Ivan", 640.0),
            ("user-10", "Judy", 590.0),
        ]
        .into_iter()
        .map(|(id, label, score)| ScoredEntity::new(id, label, score))
        .collect()
    }
}

#[async_trait]
impl SnapshotSource for MockApi {
    async fn fetch_top(&self) -> anyhow::Result<Vec<ScoredEntity>> {
        Ok(self.roster.clone())
    }
}

#[async_trait]
impl ActionSource for MockApi {
    async fn submit(&self, mut current: ScoredEntity) -> anyhow::Result<ScoredEntity> {
        tokio::time::sleep(self.action_delay).await;
        current.score += self.action_points;
        Ok(current)
    }
}
