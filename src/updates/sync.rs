use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api_client::{ApiError, SearchGateway};
use crate::data::models::Update;
use crate::updates::feed::{DateRange, UpdateFeed};
use crate::updates::push::PushSignal;

pub const UPDATES_FAILED_MESSAGE: &str = "Failed to fetch updates. Please try again later.";

/// How long the poll timer waits between unconditional refreshes. The poll
/// runs regardless of push-channel health; it is the eventual-consistency
/// backstop when the channel disconnects silently.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Proof that a refresh slot was acquired. Not constructible outside this
/// module, so completion can only follow a successful `begin_refresh`.
#[derive(Debug)]
pub struct RefreshTicket(());

/// View-state commands from the consumer, applied between refreshes.
#[derive(Debug, Clone)]
pub enum FeedCommand {
    SetCategoryFilter(String),
    SetDateRange(Option<DateRange>),
    ClearFilters,
    NextPage,
    PrevPage,
}

/// Renderable snapshot published after every feed change.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub visible: Vec<Update>,
    pub current_page: usize,
    pub page_count: usize,
    pub total_filtered: usize,
    pub categories: Vec<String>,
    pub last_error: Option<String>,
}

/// Owns the updates list and converges every refresh trigger — push signal,
/// poll tick, explicit call — onto one idempotent `refresh()`. A trigger
/// arriving while a fetch is outstanding is absorbed: the in-flight fetch
/// satisfies it, no second concurrent call starts.
pub struct UpdateFeedSync {
    gateway: Arc<dyn SearchGateway>,
    feed: UpdateFeed,
    in_flight: bool,
    last_error: Option<String>,
}

impl UpdateFeedSync {
    pub fn new(gateway: Arc<dyn SearchGateway>, page_size: usize) -> Self {
        Self {
            gateway,
            feed: UpdateFeed::new(page_size),
            in_flight: false,
            last_error: None,
        }
    }

    pub fn feed(&self) -> &UpdateFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut UpdateFeed {
        &mut self.feed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight
    }

    /// Claims the single refresh slot. `None` means a refresh is already
    /// outstanding and this trigger has been absorbed by it.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        if self.in_flight {
            debug!(target: "updates", "refresh already in flight; trigger absorbed");
            return None;
        }
        self.in_flight = true;
        Some(RefreshTicket(()))
    }

    /// Lands a fetch outcome. Success replaces the list wholesale; failure
    /// records one message and leaves the previous items untouched, so a
    /// broken refresh never corrupts the feed or any other component.
    pub fn complete_refresh(
        &mut self,
        _ticket: RefreshTicket,
        result: Result<Vec<Update>, ApiError>,
    ) {
        self.in_flight = false;
        match result {
            Ok(items) => {
                debug!(target: "updates", "feed refreshed: {} items", items.len());
                self.feed.replace_items(items);
                self.last_error = None;
            }
            Err(err) => {
                warn!(target: "updates", "feed refresh failed: {}", err);
                self.last_error = Some(UPDATES_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// The single refresh primitive. Returns false when the trigger was
    /// absorbed by an in-flight refresh.
    pub async fn refresh(&mut self) -> bool {
        let Some(ticket) = self.begin_refresh() else {
            return false;
        };
        let result = self.gateway.list_updates().await;
        self.complete_refresh(ticket, result);
        true
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            visible: self.feed.visible_page().into_iter().cloned().collect(),
            current_page: self.feed.current_page(),
            page_count: self.feed.page_count(),
            total_filtered: self.feed.filtered_count(),
            categories: self.feed.categories(),
            last_error: self.last_error.clone(),
        }
    }

    fn apply_command(&mut self, command: FeedCommand) {
        match command {
            FeedCommand::SetCategoryFilter(category) => self.feed.set_category_filter(&category),
            FeedCommand::SetDateRange(range) => self.feed.set_date_range(range),
            FeedCommand::ClearFilters => self.feed.clear_filters(),
            FeedCommand::NextPage => self.feed.next_page(),
            FeedCommand::PrevPage => self.feed.prev_page(),
        }
    }

    /// Spawns the sync loop. The first poll tick fires immediately, which is
    /// the initial fetch on mount. The returned handle is the only way the
    /// loop outlives this call; stopping or dropping it tears down the timer
    /// and the channel subscriptions with it.
    pub fn spawn(
        self,
        signals: mpsc::Receiver<PushSignal>,
        poll_interval: Duration,
    ) -> FeedHandle {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(self.snapshot());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(signals, command_rx, snapshot_tx, shutdown_rx, poll_interval));
        FeedHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    async fn run(
        mut self,
        mut signals: mpsc::Receiver<PushSignal>,
        mut commands: mpsc::Receiver<FeedCommand>,
        snapshots: watch::Sender<FeedSnapshot>,
        mut shutdown: oneshot::Receiver<()>,
        poll_interval: Duration,
    ) -> Self {
        let mut poll = tokio::time::interval(poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut signals_open = true;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(target: "updates", "feed sync shutting down");
                    break;
                }
                _ = poll.tick() => {
                    self.refresh().await;
                }
                signal = signals.recv(), if signals_open => match signal {
                    Some(signal) => {
                        info!(
                            target: "updates",
                            "push signal {}: {}",
                            signal.name(),
                            signal.message()
                        );
                        self.refresh().await;
                    }
                    None => {
                        // Best-effort channel went away; the poll keeps the
                        // feed eventually consistent on its own.
                        warn!(target: "updates", "push channel closed; relying on poll");
                        signals_open = false;
                    }
                },
                command = commands.recv() => match command {
                    Some(command) => self.apply_command(command),
                    // Handle dropped without an explicit stop.
                    None => break,
                },
            }
            // Receiver loss is not an error; the loop still serves commands.
            let _ = snapshots.send(self.snapshot());
        }
        self
    }
}

/// Consumer-side handle to a running feed sync. Commands flow in over a
/// bounded channel, snapshots flow out over a watch channel.
pub struct FeedHandle {
    commands: mpsc::Sender<FeedCommand>,
    snapshots: watch::Receiver<FeedSnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<UpdateFeedSync>,
}

impl FeedHandle {
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) -> Result<FeedSnapshot> {
        self.snapshots.changed().await?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    pub async fn send(&self, command: FeedCommand) -> Result<()> {
        self.commands.send(command).await?;
        Ok(())
    }

    /// Orderly teardown: stops the loop and returns the final sync state.
    pub async fn stop(mut self) -> Result<UpdateFeedSync> {
        if let Some(shutdown) = self.shutdown.take() {
            // The loop may already have exited; that is fine.
            let _ = shutdown.send(());
        }
        Ok(self.task.await?)
    }
}
