use std::borrow::Cow;
use std::sync::Arc;

use anyhow::Result;
use crossterm::style::Stylize;
use reedline::{
    FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Reedline, Signal,
};
use tokio::sync::mpsc;

mod display;

use council_search::api_client::SearchApiClient;
use council_search::config::Config;
use council_search::data::results_view::SortField;
use council_search::session::{AcronymWorkflow, SearchSession};
use council_search::updates::{DateRange, FeedCommand, PushSignal, UpdateFeedSync};

struct SearchPrompt;

impl Prompt for SearchPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("search> ")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

fn print_help() {
    println!("{}", "Council Data Search".blue().bold());
    println!();
    println!("Type a query and press Enter to search the classification dataset.");
    println!();
    println!("{}", "Commands:".yellow());
    println!("  {}                   - Show this help", "\\help".green());
    println!("  {}               - Show the live updates feed", "\\updates".green());
    println!(
        "  {}      - Filter the feed by category (empty clears)",
        "\\updates cat <c>".green()
    );
    println!(
        "  {}   - Page through the feed",
        "\\updates next|prev".green()
    );
    println!(
        "  {} - Filter the feed by date range",
        "\\updates date <a>..<b>".green()
    );
    println!(
        "  {}        - Clear all feed filters",
        "\\updates clear".green()
    );
    println!("  {}                 - Ask the server to reload its dataset", "\\reload".green());
    println!(
        "  {}              - Re-search your original query after a correction",
        "\\confirm".green()
    );
    println!(
        "  {} - Suggest a new acronym",
        "\\suggest <acr> <expansion>".green()
    );
    println!("  {}          - Look up acronym expansions", "\\acronym <q>".green());
    println!("  {}           - Sort results by column", "\\sort <field>".green());
    println!("  {}         - Filter displayed results", "\\filter <text>".green());
    println!("  {}             - Rows per page (5, 10 or 25)", "\\rows <n>".green());
    println!("  {}             - Jump to results page n", "\\page <n>".green());
    println!("  {}                   - Exit", "\\quit".green());
    println!();
    println!("{}", "Sortable fields:".yellow());
    for field in SortField::ALL {
        println!("  {}", field.as_str());
    }
    println!();
}

/// `<start>..<end>` with either bound optional; an empty argument clears the
/// range. Outer `None` means the argument did not parse.
fn parse_date_range(arg: &str) -> Option<Option<DateRange>> {
    if arg.is_empty() {
        return Some(None);
    }
    let (start, end) = arg.split_once("..").unwrap_or((arg, ""));
    let parse_bound = |raw: &str| -> Option<Option<chrono::NaiveDate>> {
        let raw = raw.trim();
        if raw.is_empty() {
            Some(None)
        } else {
            raw.parse::<chrono::NaiveDate>().ok().map(Some)
        }
    };
    Some(Some(DateRange {
        start: parse_bound(start)?,
        end: parse_bound(end)?,
    }))
}

fn show_results(session: &SearchSession, highlight: bool) {
    display::display_session_banners(session.state());
    display::display_acronym_matches(&session.state().acronym_matches);
    if !session.state().results.is_empty() {
        display::display_projection(&session.projection(), session.controls(), highlight);
    }
}

fn main() -> Result<()> {
    council_search::logging::init_tracing();

    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("Could not load config ({err}); using defaults");
        Config::default()
    });

    let runtime = tokio::runtime::Runtime::new()?;
    let gateway = Arc::new(SearchApiClient::new(
        &config.server.base_url,
        std::time::Duration::from_secs(config.server.timeout_secs),
    ));
    let mut session = SearchSession::new(gateway.clone());
    let workflow = AcronymWorkflow::new(gateway.clone());
    session
        .controls_mut()
        .set_rows_per_page(config.display.rows_per_page);
    let highlight = config.display.highlight_matches;

    // The push transport is an external collaborator; its adapter feeds this
    // channel. Held open here so the feed keeps listening for the lifetime
    // of the session.
    let (_push_tx, push_rx) = mpsc::channel::<PushSignal>(16);
    let feed = runtime.block_on(async {
        UpdateFeedSync::new(gateway.clone(), config.updates.page_size).spawn(
            push_rx,
            std::time::Duration::from_secs(config.updates.poll_interval_secs),
        )
    });

    print_help();
    println!(
        "{}",
        format!("Connected to API: {}", config.server.base_url).cyan()
    );

    let history_file = dirs::home_dir()
        .map(|home| home.join(".council_search_history"))
        .unwrap_or_else(|| ".council_search_history".into());
    let history =
        Box::new(FileBackedHistory::with_file(50, history_file).expect("Error configuring history"));
    let mut line_editor = Reedline::create().with_history(history);
    let prompt = SearchPrompt;

    loop {
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if let Some(command) = trimmed.strip_prefix('\\') {
                    let mut parts = command.splitn(2, ' ');
                    let name = parts.next().unwrap_or_default();
                    let rest = parts.next().unwrap_or_default().trim();

                    match name {
                        "help" => print_help(),
                        "quit" | "q" => break,
                        "updates" => {
                            match rest.split_once(' ').map_or((rest, ""), |(a, b)| (a, b.trim())) {
                                ("", _) => {}
                                ("next", _) => {
                                    runtime.block_on(feed.send(FeedCommand::NextPage))?
                                }
                                ("prev", _) => {
                                    runtime.block_on(feed.send(FeedCommand::PrevPage))?
                                }
                                ("cat", category) => runtime.block_on(
                                    feed.send(FeedCommand::SetCategoryFilter(category.to_string())),
                                )?,
                                ("date", range_arg) => match parse_date_range(range_arg) {
                                    Some(range) => runtime
                                        .block_on(feed.send(FeedCommand::SetDateRange(range)))?,
                                    None => {
                                        eprintln!("Usage: \\updates date <start>..<end> (ISO dates)");
                                        continue;
                                    }
                                },
                                ("clear", _) => {
                                    runtime.block_on(feed.send(FeedCommand::ClearFilters))?
                                }
                                (other, _) => {
                                    eprintln!("Unknown updates subcommand: {other}");
                                    continue;
                                }
                            }
                            display::display_updates(&feed.snapshot());
                        }
                        "reload" => {
                            runtime.block_on(session.reload_dataset());
                            display::display_session_banners(session.state());
                        }
                        "confirm" => {
                            if runtime.block_on(session.confirm_corrected_query()) {
                                show_results(&session, highlight);
                            } else {
                                println!("No corrected query to confirm.");
                            }
                        }
                        "suggest" => {
                            let (acronym, expansion) =
                                rest.split_once(' ').unwrap_or((rest, ""));
                            runtime.block_on(workflow.suggest(
                                &mut session,
                                acronym,
                                expansion,
                                "",
                            ));
                            display::display_session_banners(session.state());
                        }
                        "acronym" => match runtime.block_on(workflow.find_matches(rest)) {
                            Ok(matches) => display::display_acronym_matches(&matches),
                            Err(err) => eprintln!("{}", format!("Lookup failed: {err}").red()),
                        },
                        "sort" => match SortField::from_name(rest) {
                            Some(field) => {
                                session.controls_mut().request_sort(field);
                                show_results(&session, highlight);
                            }
                            None => eprintln!("Unknown field: {rest}"),
                        },
                        "filter" => {
                            session.controls_mut().set_filter_text(rest);
                            show_results(&session, highlight);
                        }
                        "rows" => match rest.parse::<usize>() {
                            Ok(rows) => {
                                if session.controls_mut().set_rows_per_page(rows) {
                                    show_results(&session, highlight);
                                } else {
                                    eprintln!("Rows per page must be 5, 10 or 25");
                                }
                            }
                            Err(_) => eprintln!("Rows per page must be 5, 10 or 25"),
                        },
                        "page" => match rest.parse::<usize>() {
                            Ok(page) => {
                                session.controls_mut().set_page(page.saturating_sub(1));
                                show_results(&session, highlight);
                            }
                            Err(_) => eprintln!("Usage: \\page <n>"),
                        },
                        other => eprintln!("Unknown command: \\{other} (try \\help)"),
                    }
                    continue;
                }

                runtime.block_on(session.submit_query(trimmed));
                show_results(&session, highlight);
            }
            Signal::CtrlD | Signal::CtrlC => break,
        }
    }

    // Orderly teardown: stop the poll timer and the push subscription.
    runtime.block_on(feed.stop())?;
    Ok(())
}
