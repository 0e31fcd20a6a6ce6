use council_search::data::models::SearchResult;
use council_search::data::results_view::{project, SortDirection, SortField, ViewControls};

fn result(main_folder: &str, document_type: &str, match_type: &str, score: f64) -> SearchResult {
    SearchResult {
        main_folder: main_folder.to_string(),
        sub_folder: format!("{main_folder} sub"),
        document_type: document_type.to_string(),
        document_type_identification_rules: format!("Rules for {document_type}"),
        supporting_information: "See folder guidance".to_string(),
        match_type: match_type.to_string(),
        score,
    }
}

fn sample() -> Vec<SearchResult> {
    vec![
        result("Revenues", "Council Tax Bill", "Exact Match", 0.95),
        result("Benefits", "Housing Benefit Claim", "Fuzzy Match", 0.72),
        result("Planning", "Planning Application", "Fuzzy Match", 0.64),
        result("Revenues", "Business Rates Notice", "Partial Match", 0.58),
        result("Elections", "Postal Vote Form", "Fuzzy Match", 0.31),
    ]
}

#[test]
fn rows_never_exceed_page_size_and_stay_within_filter() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_rows_per_page(5);
    controls.set_filter_text("match");

    let projection = project(&results, &controls, "");
    assert!(projection.rows.len() <= controls.rows_per_page());
    for row in &projection.rows {
        // Every returned row matched the filter on some field.
        assert!(SortField::ALL
            .iter()
            .any(|f| f.text_of(&row.result).to_lowercase().contains("match")));
    }
}

#[test]
fn empty_filter_matches_everything() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_rows_per_page(25);
    let projection = project(&results, &controls, "");
    assert_eq!(projection.total_filtered, results.len());
    assert_eq!(projection.rows.len(), results.len());
}

#[test]
fn filter_is_case_insensitive_across_any_field() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_filter_text("HOUSING benefit");
    let projection = project(&results, &controls, "");
    assert_eq!(projection.total_filtered, 1);
    assert_eq!(projection.rows[0].result.document_type, "Housing Benefit Claim");
}

#[test]
fn filter_matches_the_score_text_form() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_filter_text("0.95");
    let projection = project(&results, &controls, "");
    assert_eq!(projection.total_filtered, 1);
    assert_eq!(projection.rows[0].result.main_folder, "Revenues");
}

#[test]
fn sort_on_all_equal_keys_preserves_input_order() {
    let mut results = sample();
    for r in &mut results {
        r.match_type = "Fuzzy Match".to_string();
    }
    let mut controls = ViewControls::default();
    controls.set_sort(SortField::MatchType, SortDirection::Ascending);
    controls.set_rows_per_page(25);

    let projection = project(&results, &controls, "");
    let folders: Vec<&str> = projection
        .rows
        .iter()
        .map(|r| r.result.main_folder.as_str())
        .collect();
    assert_eq!(
        folders,
        vec!["Revenues", "Benefits", "Planning", "Revenues", "Elections"]
    );
}

#[test]
fn toggling_direction_exactly_reverses_unique_keys() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_sort(SortField::Score, SortDirection::Ascending);
    controls.set_rows_per_page(25);

    let ascending: Vec<String> = project(&results, &controls, "")
        .rows
        .iter()
        .map(|r| r.result.document_type.clone())
        .collect();

    controls.set_sort(SortField::Score, SortDirection::Descending);
    let mut descending: Vec<String> = project(&results, &controls, "")
        .rows
        .iter()
        .map(|r| r.result.document_type.clone())
        .collect();
    descending.reverse();

    assert_eq!(ascending, descending);
}

#[test]
fn default_sort_is_score_descending() {
    let results = sample();
    let controls = ViewControls::default();
    let projection = project(&results, &controls, "");
    assert_eq!(projection.rows[0].result.score, 0.95);
    assert_eq!(projection.rows.last().unwrap().result.score, 0.31);
}

#[test]
fn exact_match_rows_are_not_pinned_above_the_sort() {
    // The match-type badge and the sort order are deliberately decoupled.
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_sort(SortField::Score, SortDirection::Ascending);
    let projection = project(&results, &controls, "");
    assert_eq!(projection.rows[0].result.match_type, "Fuzzy Match");
}

#[test]
fn out_of_range_page_yields_empty_slice() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_rows_per_page(5);
    controls.set_page(7);
    let projection = project(&results, &controls, "");
    assert!(projection.rows.is_empty());
    // The count is still the full filtered total.
    assert_eq!(projection.total_filtered, 5);
}

#[test]
fn pagination_slices_follow_page_and_size() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_rows_per_page(5); // resets page to 0
    controls.set_sort(SortField::MainFolder, SortDirection::Ascending);

    let all: Vec<String> = {
        let mut wide = controls.clone();
        wide.set_rows_per_page(25);
        project(&results, &wide, "")
            .rows
            .iter()
            .map(|r| r.result.document_type.clone())
            .collect()
    };

    controls.set_rows_per_page(5);
    let page0: Vec<String> = project(&results, &controls, "")
        .rows
        .iter()
        .map(|r| r.result.document_type.clone())
        .collect();
    assert_eq!(page0, all[..5].to_vec());
}

#[test]
fn rows_per_page_rejects_values_outside_the_options() {
    let mut controls = ViewControls::default();
    assert!(!controls.set_rows_per_page(7));
    assert_eq!(controls.rows_per_page(), 10);
    assert!(controls.set_rows_per_page(25));
    assert_eq!(controls.rows_per_page(), 25);
}

#[test]
fn filter_change_resets_page() {
    let mut controls = ViewControls::default();
    controls.set_page(3);
    controls.set_filter_text("rates");
    assert_eq!(controls.page(), 0);
}

#[test]
fn empty_query_leaves_cell_text_unhighlighted() {
    let results = sample();
    let controls = ViewControls::default();
    let projection = project(&results, &controls, "");
    for row in &projection.rows {
        for cell in &row.cells {
            assert_eq!(cell.len(), 1);
            assert!(!cell[0].highlighted);
        }
    }
}

#[test]
fn cells_highlight_the_original_query_not_the_filter() {
    let results = sample();
    let mut controls = ViewControls::default();
    controls.set_rows_per_page(25);
    controls.set_filter_text("housing");

    let projection = project(&results, &controls, "benefit");
    let row = &projection.rows[0];
    // main_folder is "Benefits": the query run is marked, the filter is not.
    let segments = &row.cells[0];
    assert!(segments.iter().any(|s| s.highlighted && s.text == "Benefit"));
    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, "Benefits");
}

#[test]
fn repeated_sort_request_flips_direction() {
    let mut controls = ViewControls::default();
    controls.request_sort(SortField::MainFolder);
    assert_eq!(controls.sort_direction(), SortDirection::Ascending);
    controls.request_sort(SortField::MainFolder);
    assert_eq!(controls.sort_direction(), SortDirection::Descending);
    controls.request_sort(SortField::Score);
    assert_eq!(controls.sort_field(), SortField::Score);
    assert_eq!(controls.sort_direction(), SortDirection::Ascending);
}
