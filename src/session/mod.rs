//! Search session orchestration: one query lifecycle, its owned state, and
//! the acronym suggestion workflow that reports into it.

pub mod acronym;
pub mod search_session;

pub use acronym::AcronymWorkflow;
pub use search_session::{QueryTicket, SearchSession, SearchSessionState};
