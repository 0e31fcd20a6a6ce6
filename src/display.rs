use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use council_search::data::highlight::Segment;
use council_search::data::models::AcronymMatch;
use council_search::data::results_view::{Projection, SortField, ViewControls};
use council_search::session::SearchSessionState;
use council_search::updates::FeedSnapshot;

/// Matched runs get the classic yellow-marker treatment.
fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| {
            if seg.highlighted {
                seg.text.clone().black().on_yellow().to_string()
            } else {
                seg.text.clone()
            }
        })
        .collect()
}

pub fn display_projection(
    projection: &Projection,
    controls: &ViewControls,
    highlight: bool,
) {
    if projection.rows.is_empty() {
        println!("{}", "No results on this page.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = SortField::ALL
        .iter()
        .map(|field| {
            let mut name = field.as_str().replace('_', " ").to_uppercase();
            if *field == controls.sort_field() {
                name.push_str(" *");
            }
            Cell::new(name).add_attribute(Attribute::Bold)
        })
        .collect();
    table.set_header(headers);

    for row in &projection.rows {
        let mut cells: Vec<String> = if highlight {
            row.cells.iter().map(|segs| render_segments(segs)).collect()
        } else {
            SortField::ALL.iter().map(|f| f.text_of(&row.result)).collect()
        };
        // Score prints fixed-precision regardless of highlighting.
        if let Some(last) = cells.last_mut() {
            *last = format!("{:.2}", row.result.score);
        }
        table.add_row(cells);
    }

    println!("{table}");

    let start = controls.page() * controls.rows_per_page();
    let pages = projection
        .total_filtered
        .div_ceil(controls.rows_per_page())
        .max(1);
    println!(
        "{}",
        format!(
            "Rows {}-{} of {} (page {} of {})",
            start + 1,
            start + projection.rows.len(),
            projection.total_filtered,
            controls.page() + 1,
            pages
        )
        .green()
    );
}

pub fn display_session_banners(state: &SearchSessionState) {
    if !state.error.is_empty() {
        eprintln!("{}", state.error.clone().red());
    }
    if !state.message.is_empty() {
        println!("{}", state.message.clone().cyan());
    }
    if state.exact {
        println!("{}", "Exact match".green().bold());
    }
    if let Some(corrected) = &state.corrected_query {
        println!(
            "Showing results for: {}  ({} to re-search your original query)",
            corrected.clone().bold(),
            "\\confirm".green()
        );
    }
}

pub fn display_acronym_matches(matches: &[AcronymMatch]) {
    if matches.is_empty() {
        return;
    }
    println!("{}", "Acronym matches:".blue().bold());
    for m in matches {
        match &m.context {
            Some(context) => println!("  {}: {} ({})", m.acronym.clone().bold(), m.expansion, context),
            None => println!("  {}: {}", m.acronym.clone().bold(), m.expansion),
        }
    }
}

pub fn display_updates(snapshot: &FeedSnapshot) {
    if let Some(error) = &snapshot.last_error {
        eprintln!("{}", error.clone().red());
    }
    if snapshot.visible.is_empty() {
        println!("{}", "No updates to show.".yellow());
        return;
    }

    println!("{}", "Latest updates".blue().bold());
    for update in &snapshot.visible {
        let badge = if update.is_new {
            " NEW".red().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  [{}] {}{} - {} ({})",
            update.category.clone().cyan(),
            update.main_folder,
            badge,
            update.description,
            update.date
        );
    }
    println!(
        "{}",
        format!(
            "Page {} of {} ({} updates){}",
            snapshot.current_page + 1,
            snapshot.page_count.max(1),
            snapshot.total_filtered,
            if snapshot.categories.is_empty() {
                String::new()
            } else {
                format!("  categories: {}", snapshot.categories.join(", "))
            }
        )
        .green()
    );
}
