use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::{ApiError, SearchGateway};
use crate::data::models::{AcronymMatch, AcronymSuggestion};
use crate::session::search_session::SearchSession;

pub const SUGGEST_OK_MESSAGE: &str = "Acronym suggestion submitted successfully";
pub const SUGGEST_FAILED_MESSAGE: &str = "Failed to suggest acronym. Please try again.";

/// Submits new acronym suggestions and looks up expansions. Stateless apart
/// from the gateway handle; outcomes are reported into the search session's
/// message channel.
pub struct AcronymWorkflow {
    gateway: Arc<dyn SearchGateway>,
}

impl AcronymWorkflow {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self { gateway }
    }

    /// Submits a suggestion. `acronym` and `expansion` must be non-empty
    /// after trimming; anything further is the server's call. The local
    /// rejection happens before any remote call. Returns whether the
    /// submission surface should close.
    pub async fn suggest(
        &self,
        session: &mut SearchSession,
        acronym: &str,
        expansion: &str,
        context: &str,
    ) -> bool {
        if acronym.trim().is_empty() || expansion.trim().is_empty() {
            session.report_failure(SUGGEST_FAILED_MESSAGE);
            return false;
        }

        let suggestion = AcronymSuggestion {
            acronym: acronym.trim().to_string(),
            expansion: expansion.trim().to_string(),
            context: context.trim().to_string(),
        };

        match self.gateway.suggest_acronym(&suggestion).await {
            Ok(ack) => {
                info!(target: "acronym", "suggestion accepted: {}", ack.message);
                session.report_notice(SUGGEST_OK_MESSAGE);
                true
            }
            Err(err) => {
                warn!(target: "acronym", "suggestion failed: {}", err);
                session.report_failure(SUGGEST_FAILED_MESSAGE);
                false
            }
        }
    }

    /// Standalone expansion lookup; does not touch session state.
    pub async fn find_matches(&self, input: &str) -> Result<Vec<AcronymMatch>, ApiError> {
        let matches = self.gateway.search_acronyms(input).await?;
        info!(target: "acronym", "{} matches for {:?}", matches.len(), input);
        Ok(matches)
    }
}
