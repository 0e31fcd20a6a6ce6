use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api_client::{ApiError, SearchGateway};
use crate::data::models::{AcronymMatch, SearchResponse, SearchResult};
use crate::data::results_view::{self, Projection, ViewControls};

pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching. Please try again.";
pub const RELOAD_OK_MESSAGE: &str = "Data reloaded successfully";
pub const RELOAD_FAILED_MESSAGE: &str = "Failed to reload data. Please try again.";

/// Everything one search lifecycle owns. `loading == true` means `results`
/// still reflects the previous completed search. `message` and `error` may
/// both be set; the most recent write is the one the user should see.
#[derive(Debug, Clone, Default)]
pub struct SearchSessionState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub acronym_matches: Vec<AcronymMatch>,
    pub message: String,
    pub error: String,
    pub exact: bool,
    pub corrected_query: Option<String>,
    pub loading: bool,
}

/// Sequence token for one issued query. A response is applied only when its
/// ticket is the most recently issued one, so "last issued wins" rather than
/// "last arrived wins" when submits overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    seq: u64,
}

/// Orchestrates one search lifecycle against the remote gateway and owns
/// both the session state and the table controls. All mutation of the state
/// goes through the operations here.
pub struct SearchSession {
    gateway: Arc<dyn SearchGateway>,
    state: SearchSessionState,
    controls: ViewControls,
    issued_seq: u64,
}

impl SearchSession {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self {
            gateway,
            state: SearchSessionState::default(),
            controls: ViewControls::default(),
            issued_seq: 0,
        }
    }

    pub fn state(&self) -> &SearchSessionState {
        &self.state
    }

    pub fn controls(&self) -> &ViewControls {
        &self.controls
    }

    /// Mutable access to the table controls. The controls enforce their own
    /// reset rules through their setters.
    pub fn controls_mut(&mut self) -> &mut ViewControls {
        &mut self.controls
    }

    /// Synchronous half of a query submission: applies the pre-flight state
    /// changes and issues the sequence token. An empty string is a legal
    /// query and goes to the server as-is.
    pub fn begin_query(&mut self, query: &str) -> QueryTicket {
        self.state.loading = true;
        self.state.error.clear();
        self.state.message.clear();
        self.state.results.clear();
        self.state.acronym_matches.clear();
        self.state.corrected_query = None;
        self.state.query = query.to_string();
        self.controls.reset_page();
        self.issued_seq += 1;
        debug!(target: "session", "query #{} issued: {:?}", self.issued_seq, query);
        QueryTicket {
            seq: self.issued_seq,
        }
    }

    /// Applies a gateway response for the given ticket. Stale responses
    /// (a newer query has been issued since) are discarded; returns whether
    /// the response was applied.
    pub fn apply_response(
        &mut self,
        ticket: QueryTicket,
        result: Result<SearchResponse, ApiError>,
    ) -> bool {
        if ticket.seq != self.issued_seq {
            debug!(
                target: "session",
                "discarding stale response for query #{} (latest is #{})",
                ticket.seq, self.issued_seq
            );
            return false;
        }

        match result {
            Ok(response) => {
                info!(
                    target: "session",
                    "query #{}: {} matches, {} acronym matches, exact={}",
                    ticket.seq,
                    response.matches.len(),
                    response.acronym_matches.as_ref().map_or(0, Vec::len),
                    response.exact
                );
                self.state.results = response.matches;
                self.state.message = response.message;
                self.state.exact = response.exact;
                self.state.corrected_query = response.corrected_query;
                self.state.acronym_matches = response.acronym_matches.unwrap_or_default();
            }
            Err(err) => {
                warn!(target: "session", "query #{} failed: {}", ticket.seq, err);
                self.state.error = SEARCH_FAILED_MESSAGE.to_string();
            }
        }
        self.state.loading = false;
        true
    }

    /// Full query lifecycle: begin, call the gateway, apply. A submission
    /// overlapping an earlier one is not cancelled; the earlier response is
    /// discarded by the ticket check instead.
    pub async fn submit_query(&mut self, query: &str) {
        let ticket = self.begin_query(query);
        let result = self.gateway.search(query).await;
        self.apply_response(ticket, result);
    }

    /// Explicit user confirmation of the server's "did you mean" flow:
    /// re-searches the original query verbatim. Does nothing unless the
    /// server offered a corrected query. Never invoked automatically.
    pub async fn confirm_corrected_query(&mut self) -> bool {
        if self.state.corrected_query.is_none() {
            return false;
        }
        let original = self.state.query.clone();
        self.submit_query(&original).await;
        true
    }

    /// Asks the server to reload its dataset. The outcome lands in the
    /// session message channel; the updates feed hears about the reload
    /// separately through the push channel.
    pub async fn reload_dataset(&mut self) {
        match self.gateway.reload_data().await {
            Ok(ack) => {
                info!(target: "session", "dataset reloaded: {}", ack.message);
                self.state.message = RELOAD_OK_MESSAGE.to_string();
            }
            Err(err) => {
                warn!(target: "session", "dataset reload failed: {}", err);
                self.state.error = RELOAD_FAILED_MESSAGE.to_string();
            }
        }
    }

    /// Entry point for collaborating workflows to surface a success message.
    pub fn report_notice(&mut self, message: &str) {
        self.state.message = message.to_string();
    }

    /// Entry point for collaborating workflows to surface a failure.
    pub fn report_failure(&mut self, message: &str) {
        self.state.error = message.to_string();
    }

    /// Current display projection of the owned results under the owned
    /// controls, highlighted against the session query.
    pub fn projection(&self) -> Projection {
        results_view::project(&self.state.results, &self.controls, &self.state.query)
    }
}
