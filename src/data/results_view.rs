use std::cmp::Ordering;

use crate::data::highlight::{Highlighter, Segment};
use crate::data::models::SearchResult;

/// Rows-per-page choices offered by the results table.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// The seven sortable columns, closed at compile time. Each variant knows
/// how to read its text form and how to compare two results, so no dynamic
/// field lookup happens at sort time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    MainFolder,
    SubFolder,
    DocumentType,
    DocumentTypeIdentificationRules,
    SupportingInformation,
    MatchType,
    Score,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::MainFolder,
        SortField::SubFolder,
        SortField::DocumentType,
        SortField::DocumentTypeIdentificationRules,
        SortField::SupportingInformation,
        SortField::MatchType,
        SortField::Score,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::MainFolder => "main_folder",
            SortField::SubFolder => "sub_folder",
            SortField::DocumentType => "document_type",
            SortField::DocumentTypeIdentificationRules => "document_type_identification_rules",
            SortField::SupportingInformation => "supporting_information",
            SortField::MatchType => "match_type",
            SortField::Score => "score",
        }
    }

    pub fn from_name(name: &str) -> Option<SortField> {
        SortField::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Text form of the field, used for filtering and highlighting.
    pub fn text_of(&self, result: &SearchResult) -> String {
        match self {
            SortField::MainFolder => result.main_folder.clone(),
            SortField::SubFolder => result.sub_folder.clone(),
            SortField::DocumentType => result.document_type.clone(),
            SortField::DocumentTypeIdentificationRules => {
                result.document_type_identification_rules.clone()
            }
            SortField::SupportingInformation => result.supporting_information.clone(),
            SortField::MatchType => result.match_type.clone(),
            SortField::Score => result.score.to_string(),
        }
    }

    /// Ascending comparison on this field: lexicographic for the string
    /// columns, numeric for score. NaN scores compare as equal so the sort
    /// stays total and stable.
    pub fn compare(&self, a: &SearchResult, b: &SearchResult) -> Ordering {
        match self {
            SortField::MainFolder => a.main_folder.cmp(&b.main_folder),
            SortField::SubFolder => a.sub_folder.cmp(&b.sub_folder),
            SortField::DocumentType => a.document_type.cmp(&b.document_type),
            SortField::DocumentTypeIdentificationRules => a
                .document_type_identification_rules
                .cmp(&b.document_type_identification_rules),
            SortField::SupportingInformation => {
                a.supporting_information.cmp(&b.supporting_information)
            }
            SortField::MatchType => a.match_type.cmp(&b.match_type),
            SortField::Score => a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Current table controls. `page` resets to 0 whenever the query, the filter
/// text, or the page size changes; sort field and direction persist across
/// searches. All mutation goes through the setters so the reset rules cannot
/// be bypassed.
#[derive(Debug, Clone)]
pub struct ViewControls {
    page: usize,
    rows_per_page: usize,
    sort_field: SortField,
    sort_direction: SortDirection,
    filter_text: String,
}

impl Default for ViewControls {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            // Score descending first: the server's strongest matches on top.
            sort_field: SortField::Score,
            sort_direction: SortDirection::Descending,
            filter_text: String::new(),
        }
    }
}

impl ViewControls {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Called by the session on every new query.
    pub fn reset_page(&mut self) {
        self.page = 0;
    }

    /// Only the offered page sizes are accepted; anything else is ignored.
    /// Changing the page size jumps back to the first page.
    pub fn set_rows_per_page(&mut self, rows: usize) -> bool {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            return false;
        }
        self.rows_per_page = rows;
        self.page = 0;
        true
    }

    /// Column-header click semantics: a repeated click on the ascending
    /// column flips it to descending, any other click sorts ascending.
    pub fn request_sort(&mut self, field: SortField) {
        let was_ascending =
            self.sort_field == field && self.sort_direction == SortDirection::Ascending;
        self.sort_direction = if was_ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort_field = field;
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort_field = field;
        self.sort_direction = direction;
    }

    pub fn set_filter_text(&mut self, filter: &str) {
        self.filter_text = filter.to_string();
        self.page = 0;
    }
}

/// One displayed row: the result itself plus its seven field values split
/// into highlight runs against the original query.
#[derive(Debug, Clone)]
pub struct ProjectedRow {
    pub result: SearchResult,
    pub cells: Vec<Vec<Segment>>,
}

/// Output of [`project`]. `total_filtered` is the post-filter,
/// pre-pagination count the caller needs for page-count display.
#[derive(Debug, Clone)]
pub struct Projection {
    pub rows: Vec<ProjectedRow>,
    pub total_filtered: usize,
}

fn matches_filter(result: &SearchResult, filter_lower: &str) -> bool {
    if filter_lower.is_empty() {
        return true;
    }
    SortField::ALL
        .iter()
        .any(|field| field.text_of(result).to_lowercase().contains(filter_lower))
}

/// Pure projection of a result set for display: filter, stable sort,
/// paginate, highlight. Never mutates its input and never clamps the page;
/// an out-of-range page yields an empty slice.
pub fn project(results: &[SearchResult], controls: &ViewControls, query: &str) -> Projection {
    let filter_lower = controls.filter_text().to_lowercase();
    let mut filtered: Vec<&SearchResult> = results
        .iter()
        .filter(|r| matches_filter(r, &filter_lower))
        .collect();

    let total_filtered = filtered.len();

    // Stable sort; direction flips the comparator sign rather than
    // reversing afterwards, so equal keys keep their filtered order.
    let field = controls.sort_field();
    let direction = controls.sort_direction();
    filtered.sort_by(|a, b| direction.apply(field.compare(a, b)));

    let start = controls.page() * controls.rows_per_page();
    let highlighter = Highlighter::new(query);
    let rows = filtered
        .into_iter()
        .skip(start)
        .take(controls.rows_per_page())
        .map(|result| ProjectedRow {
            cells: SortField::ALL
                .iter()
                .map(|f| highlighter.split(&f.text_of(result)))
                .collect(),
            result: result.clone(),
        })
        .collect();

    Projection {
        rows,
        total_filtered,
    }
}
