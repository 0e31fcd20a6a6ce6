use chrono::NaiveDate;

use crate::data::models::Update;

/// Fixed page size of the updates panel.
pub const DEFAULT_UPDATES_PER_PAGE: usize = 5;

/// Inclusive date bounds for the feed filter. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Accepts plain ISO dates and ISO date-times; the feed only needs day
/// granularity for range checks.
pub fn parse_update_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// The updates list and its view state. Items are only ever replaced
/// wholesale (idempotent replacement: the latest fetch fully overwrites, so
/// trigger order and overlap cannot corrupt the list). `current_page` is
/// re-clamped after every change that can shrink the filtered count.
#[derive(Debug, Clone)]
pub struct UpdateFeed {
    items: Vec<Update>,
    current_page: usize,
    category_filter: String,
    date_range: Option<DateRange>,
    page_size: usize,
}

impl Default for UpdateFeed {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATES_PER_PAGE)
    }
}

impl UpdateFeed {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            category_filter: String::new(),
            date_range: None,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[Update] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn category_filter(&self) -> &str {
        &self.category_filter
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// Wholesale replacement from a completed fetch. No incremental merge.
    pub fn replace_items(&mut self, items: Vec<Update>) {
        self.items = items;
        self.clamp_page();
    }

    /// Empty string means "all categories".
    pub fn set_category_filter(&mut self, category: &str) {
        self.category_filter = category.to_string();
        self.clamp_page();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.date_range = range;
        self.clamp_page();
    }

    pub fn clear_filters(&mut self) {
        self.category_filter.clear();
        self.date_range = None;
        self.current_page = 0;
    }

    pub fn next_page(&mut self) {
        self.current_page = (self.current_page + 1).min(self.max_page());
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1);
    }

    fn max_page(&self) -> usize {
        self.filtered_count().saturating_sub(1) / self.page_size
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.min(self.max_page());
    }

    fn passes(&self, update: &Update) -> bool {
        if !self.category_filter.is_empty() && update.category != self.category_filter {
            return false;
        }
        if let Some(range) = &self.date_range {
            let Some(date) = parse_update_date(&update.date) else {
                // Unparseable dates cannot satisfy an active range.
                return range.start.is_none() && range.end.is_none();
            };
            if range.start.is_some_and(|start| date < start) {
                return false;
            }
            if range.end.is_some_and(|end| date > end) {
                return false;
            }
        }
        true
    }

    pub fn filtered(&self) -> Vec<&Update> {
        self.items.iter().filter(|u| self.passes(u)).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.items.iter().filter(|u| self.passes(u)).count()
    }

    /// The slice of filtered items on the current page.
    pub fn visible_page(&self) -> Vec<&Update> {
        self.filtered()
            .into_iter()
            .skip(self.current_page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size)
    }

    /// Distinct categories over the unfiltered list, first-seen order. The
    /// dropdown deliberately does not shrink as other filters narrow the
    /// visible results.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for update in &self.items {
            if !seen.iter().any(|c| c == &update.category) {
                seen.push(update.category.clone());
            }
        }
        seen
    }
}
