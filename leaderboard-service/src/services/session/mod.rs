// ============================================
// Leaderboard Session
// ============================================
//
// Owns the per-session leaderboard state:
// - the current RankedSet snapshot (swapped atomically under a lock)
// - the transient flash markers for presentation
// - the current user's own record
// - the single-outstanding action guard
//
// All mutation goes through this type; the ranked core itself is pure, so
// concurrent readers only ever see a complete snapshot.

pub mod marker;

pub use marker::FlashState;

use crate::models::ScoredEntity;
use crate::services::ranked::RankedSet;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("initial load failed: {0}")]
    LoadFailed(String),

    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    #[error("an action is already in flight")]
    ActionPending,

    #[error("action failed: {0}")]
    ActionFailed(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Read-only source for the initial leaderboard batch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_top(&self) -> anyhow::Result<Vec<ScoredEntity>>;
}

/// Round-trip endpoint for the current user's action. Returns the updated
/// record after a (simulated) delay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionSource: Send + Sync {
    async fn submit(&self, current: ScoredEntity) -> anyhow::Result<ScoredEntity>;
}

pub struct LeaderboardSession {
    state: RwLock<Option<RankedSet>>,
    flash: RwLock<FlashState>,
    me: RwLock<ScoredEntity>,
    action_in_flight: AtomicBool,
    flash_duration: Duration,
}

impl LeaderboardSession {
    pub fn new(me: ScoredEntity, flash_duration: Duration) -> Self {
        Self {
            state: RwLock::new(None),
            flash: RwLock::new(FlashState::new()),
            me: RwLock::new(me),
            action_in_flight: AtomicBool::new(false),
            flash_duration,
        }
    }

    /// Fetch the initial batch and install the first snapshot.
    ///
    /// Any fetch or validation failure surfaces as `LoadFailed` and leaves
    /// the session unloaded; no partial leaderboard is ever installed.
    pub async fn load(&self, source: &dyn SnapshotSource) -> Result<()> {
        let batch = source
            .fetch_top()
            .await
            .map_err(|e| SessionError::LoadFailed(e.to_string()))?;
        self.install_initial(batch).await
    }

    /// Install a pre-fetched batch, folding in the current user's record.
    pub async fn install_initial(&self, batch: Vec<ScoredEntity>) -> Result<()> {
        for entity in &batch {
            entity
                .validate()
                .map_err(|e| SessionError::LoadFailed(e.to_string()))?;
        }

        let mut entities = batch;
        entities.push(self.me.read().await.clone());
        let set = RankedSet::from_entities(entities);

        info!(entries = set.len(), "leaderboard loaded");
        *self.state.write().await = Some(set);
        Ok(())
    }

    /// Apply one replacement snapshot from the feed and flash its id.
    pub async fn ingest(&self, update: ScoredEntity) -> Result<()> {
        update
            .validate()
            .map_err(|e| SessionError::InvalidUpdate(e.to_string()))?;

        let id = update.id.clone();
        {
            let mut state = self.state.write().await;
            let current = state.take().unwrap_or_default();
            *state = Some(current.apply_update(update));
        }
        self.flash.write().await.mark(&id, self.flash_duration);

        debug!(id = %id, "update applied");
        Ok(())
    }

    /// Submit the current user's action. At most one call may be in flight;
    /// a second call while one is pending returns `ActionPending` without
    /// touching any state. The guard is released on success, failure, and
    /// cancellation alike.
    pub async fn perform_action(&self, source: &dyn ActionSource) -> Result<ScoredEntity> {
        if self
            .action_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("action ignored, one already in flight");
            return Err(SessionError::ActionPending);
        }
        let _guard = ReleaseOnDrop(&self.action_in_flight);

        let current = self.me.read().await.clone();
        let updated = match source.submit(current).await {
            Ok(updated) => updated,
            Err(e) => {
                warn!(error = %e, "action round-trip failed, prior score retained");
                return Err(SessionError::ActionFailed(e.to_string()));
            }
        };
        updated
            .validate()
            .map_err(|e| SessionError::ActionFailed(e.to_string()))?;

        *self.me.write().await = updated.clone();
        self.ingest(updated.clone()).await?;

        info!(id = %updated.id, score = updated.score, "action applied");
        Ok(updated)
    }

    /// Top slice for rendering. Empty until the initial load completes.
    pub async fn top_n(&self, n: usize) -> Vec<ScoredEntity> {
        match self.state.read().await.as_ref() {
            Some(set) => set.top_n(n).to_vec(),
            None => Vec::new(),
        }
    }

    pub async fn me(&self) -> ScoredEntity {
        self.me.read().await.clone()
    }

    /// Ids whose flash window is still open, for presentation emphasis.
    pub async fn flashing_ids(&self) -> Vec<String> {
        self.flash.write().await.active_ids()
    }

    pub fn action_in_flight(&self) -> bool {
        self.action_in_flight.load(Ordering::Acquire)
    }
}

/// Resets the action guard when the round-trip future is dropped, so a
/// cancelled action cannot lock the trigger out permanently.
struct ReleaseOnDrop<'a>(&'a AtomicBool);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
