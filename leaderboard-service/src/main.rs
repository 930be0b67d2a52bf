use leaderboard_service::{
    services::run_consumer, Config, LeaderboardSession, MockApi, MockScoreFeed, ScoreFeed,
    ScoredEntity,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Load config
    let config = Config::from_env().expect("Failed to load config");

    info!(
        "Starting {} (top_n={}, feed every {}ms)",
        config.service.service_name, config.leaderboard.top_n, config.feed.interval_ms
    );

    let me = ScoredEntity::new("user-11", "You", 450.0);
    let session = Arc::new(LeaderboardSession::new(
        me,
        Duration::from_millis(config.leaderboard.flash_duration_ms),
    ));

    // Mock backend: fixed roster batch + simulated action round-trip
    let api = Arc::new(MockApi::new(
        MockApi::default_roster(),
        Duration::from_millis(config.action.delay_ms),
        config.action.points,
    ));

    session.load(api.as_ref()).await?;

    // Live update feed over the same roster
    let feed = MockScoreFeed::new(
        api.roster().to_vec(),
        Duration::from_millis(config.feed.interval_ms),
    );
    let subscription = feed.subscribe().await?;
    let consumer = tokio::spawn(run_consumer(subscription, session.clone()));

    // Render loop: log the top slice each feed interval, and fire the
    // user action now and then the way the demo UI button would.
    let render = {
        let session = session.clone();
        let api = api.clone();
        let top_n = config.leaderboard.top_n;
        let interval = Duration::from_millis(config.feed.interval_ms);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut ticks: u32 = 0;
            loop {
                ticker.tick().await;
                ticks += 1;

                let top = session.top_n(top_n).await;
                let flashing = session.flashing_ids().await;
                if let Ok(payload) = serde_json::to_string(&top) {
                    tracing::debug!(payload = %payload, "presentation snapshot");
                }
                for (rank, entry) in top.iter().enumerate() {
                    info!(
                        rank = rank + 1,
                        id = %entry.id,
                        label = %entry.label,
                        score = entry.score,
                        flashing = flashing.contains(&entry.id),
                        "leaderboard"
                    );
                }

                // Every fifth tick, perform the user's action
                if ticks % 5 == 0 {
                    match session.perform_action(api.as_ref()).await {
                        Ok(updated) => info!(score = updated.score, "your action landed"),
                        Err(e) => warn!(error = %e, "action not applied"),
                    }
                }
            }
        })
    };

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    // Dropping the consumer tears down the subscription, which aborts the
    // mock producer; nothing outlives the session.
    render.abort();
    consumer.abort();

    Ok(())
}
