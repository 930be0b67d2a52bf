use super::FeedSubscription;
use crate::services::session::LeaderboardSession;
use std::sync::Arc;
use tracing::{info, warn};

/// Drain a feed subscription into the session, one update at a time, in
/// receipt order. Invalid updates are dropped with a diagnostic and never
/// touch the installed snapshot. Runs until the feed closes or the
/// subscription is torn down.
pub async fn run_consumer(mut subscription: FeedSubscription, session: Arc<LeaderboardSession>) {
    while let Some(update) = subscription.recv().await {
        let id = update.id.clone();
        if let Err(err) = session.ingest(update).await {
            warn!(id = %id, error = %err, "dropping invalid feed update");
        }
    }
    info!("feed consumer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoredEntity;
    use crate::services::session::LeaderboardSession;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_consumer_applies_updates_in_receipt_order() {
        let session = Arc::new(LeaderboardSession::new(
            ScoredEntity::new("me", "You", 450.0),
            Duration::from_millis(700),
        ));
        session
            .install_initial(vec![ScoredEntity::new("user-1", "Alice", 100.0)])
            .await
            .unwrap();

        let (tx, rx) = mpsc::channel(8);
        let producer = tokio::spawn(async {});
        let sub = FeedSubscription::new(rx, producer);

        // Two updates for the same id: last received must win.
        tx.send(ScoredEntity::new("user-1", "Alice", 200.0))
            .await
            .unwrap();
        tx.send(ScoredEntity::new("user-1", "Alice", 150.0))
            .await
            .unwrap();
        // An invalid update must be dropped without corrupting state.
        tx.send(ScoredEntity::new("user-1", "Alice", f64::NAN))
            .await
            .unwrap();
        drop(tx);

        run_consumer(sub, session.clone()).await;

        let top = session.top_n(10).await;
        let alice = top.iter().find(|e| e.id == "user-1").unwrap();
        assert_eq!(alice.score, 150.0);
    }
}
