//! The dataset-updates feed: push-plus-poll synchronization with in-flight
//! deduplication, and the pure view state it maintains.

pub mod feed;
pub mod push;
pub mod sync;

pub use feed::{DateRange, UpdateFeed, DEFAULT_UPDATES_PER_PAGE};
pub use push::PushSignal;
pub use sync::{
    FeedCommand, FeedHandle, FeedSnapshot, UpdateFeedSync, DEFAULT_POLL_INTERVAL,
    UPDATES_FAILED_MESSAGE,
};
