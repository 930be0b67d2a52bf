// ============================================
// Score Feed (push-update boundary)
// ============================================
//
// The feed delivers one replacement snapshot at a time, in order, until the
// subscription is dropped. The delivery mechanism here is a tokio mpsc
// channel fed by a producer task, but consumers only rely on the trait
// contract, not on the mechanism.

pub mod consumer;

pub use consumer::run_consumer;

use crate::models::ScoredEntity;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed is closed: {0}")]
    Closed(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// Source of live score updates.
#[async_trait]
pub trait ScoreFeed: Send + Sync {
    async fn subscribe(&self) -> Result<FeedSubscription>;
}

/// An active subscription: the receiving end of the update stream plus the
/// producer task that feeds it. Dropping the subscription aborts the
/// producer, so no timer or task outlives the session that subscribed.
pub struct FeedSubscription {
    rx: mpsc::Receiver<ScoredEntity>,
    producer: JoinHandle<()>,
}

impl FeedSubscription {
    pub fn new(rx: mpsc::Receiver<ScoredEntity>, producer: JoinHandle<()>) -> Self {
        Self { rx, producer }
    }

    /// Receive the next update, or `None` once the producer is gone.
    pub async fn recv(&mut self) -> Option<ScoredEntity> {
        self.rx.recv().await
    }

    /// Explicit teardown. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {
        // Drop runs the abort.
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.producer.abort();
        debug!("feed subscription dropped, producer aborted");
    }
}

/// Simulated live feed: every tick, bump a random roster member's score by
/// a random 1..=20 delta and publish the new snapshot. Stands in for the
/// real push source during development and tests.
pub struct MockScoreFeed {
    roster: Vec<ScoredEntity>,
    interval: Duration,
}

impl MockScoreFeed {
    pub fn new(roster: Vec<ScoredEntity>, interval: Duration) -> Self {
        Self { roster, interval }
    }
}

#[async_trait]
impl ScoreFeed for MockScoreFeed {
    async fn subscribe(&self) -> Result<FeedSubscription> {
        if self.roster.is_empty() {
            return Err(FeedError::Closed("mock feed has an empty roster".into()));
        }

        let (tx, rx) = mpsc::channel(64);
        let mut roster = self.roster.clone();
        let interval = self.interval;

        let producer = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately; skip it
            // so subscribers see the initial snapshot before any update.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let (index, delta) = {
                    let mut rng = rand::thread_rng();
                    (
                        rng.gen_range(0..roster.len()),
                        rng.gen_range(1..=20) as f64,
                    )
                };
                roster[index].score += delta;
                let update = roster[index].clone();

                debug!(id = %update.id, score = update.score, "mock feed update");
                if tx.send(update).await.is_err() {
                    // Receiver gone, stop producing.
                    break;
                }
            }
        });

        Ok(FeedSubscription::new(rx, producer))
    }
}
