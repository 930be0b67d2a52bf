pub mod feed;
pub mod mock_api;
pub mod ranked;
pub mod session;

pub use feed::{run_consumer, FeedSubscription, MockScoreFeed, ScoreFeed};
pub use mock_api::MockApi;
pub use ranked::RankedSet;
pub use session::{ActionSource, LeaderboardSession, SessionError, SnapshotSource};
