use serde::{Deserialize, Serialize};

/// One ranked match from the classification dataset.
///
/// `match_type` is an open set of labels ("Exact Match", "Fuzzy Match", ...);
/// the server may introduce new values, so it stays a plain string rather
/// than an enum. `score` is the server's rank value; sort direction is
/// user-controlled, higher is not inherently better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub main_folder: String,
    pub sub_folder: String,
    pub document_type: String,
    pub document_type_identification_rules: String,
    pub supporting_information: String,
    pub match_type: String,
    pub score: f64,
}

/// One entry in the dataset-updates feed.
///
/// `new` is asserted by the server, never recomputed here. `date` is an
/// ISO-8601 string; it is only parsed when a date-range filter needs to
/// order it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub main_folder: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "new")]
    pub is_new: bool,
    pub date: String,
}

/// An acronym expansion returned alongside (not instead of) document
/// matches. Lives only for the duration of one search session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcronymMatch {
    pub acronym: String,
    pub expansion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Response body of `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub exact: bool,
    pub message: String,
    pub matches: Vec<SearchResult>,
    #[serde(default)]
    pub corrected_query: Option<String>,
    #[serde(default)]
    pub acronym_matches: Option<Vec<AcronymMatch>>,
}

/// Request body of `POST /api/acronyms/suggest`.
#[derive(Debug, Clone, Serialize)]
pub struct AcronymSuggestion {
    pub acronym: String,
    pub expansion: String,
    pub context: String,
}

/// Response body of `POST /reload_data` and `POST /api/acronyms/suggest`.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

/// Error body the server attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
