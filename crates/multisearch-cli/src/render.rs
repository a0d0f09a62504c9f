//! Terminal rendering of the session state.

use colored::Colorize;
use multisearch_core::outcome::ResultItem;
use multisearch_core::presentation::{ResultsView, SortOrder, paginate, sort_results};
use multisearch_core::state::SearchSessionState;

pub fn print_state(state: &SearchSessionState, sort: SortOrder, page: usize, page_size: usize) {
    match ResultsView::from_state(state) {
        ResultsView::Idle => println!("{}", "No search yet".bright_black()),
        ResultsView::Loading { query, .. } => {
            println!("{}", format!("Searching for \"{query}\"...").bright_black())
        }
        ResultsView::Error { query, message, .. } => {
            if let Some(query) = query {
                println!("{}", format!("Search for \"{query}\" failed").red().bold());
            }
            println!("{}", message.red());
            println!("{}", "Run the search again to retry.".bright_black());
        }
        ResultsView::Empty { query } => {
            println!("{}", format!("No results for \"{query}\"").yellow());
        }
        ResultsView::Results {
            query,
            items,
            total_results,
            processing_time,
            suggestions,
        } => {
            println!("{}", summary_line(query, total_results, processing_time).bright_yellow());

            let sorted = sort_results(items, sort);
            let page = paginate(&sorted, page, page_size);
            for item in page.items {
                print_item(item);
            }
            if page.page_count > 1 {
                println!(
                    "{}",
                    format!("Page {}/{}", page.number, page.page_count).bright_black()
                );
            }
            if !suggestions.is_empty() {
                println!("{} {}", "Related:".bright_black(), suggestions.join(", "));
            }
        }
    }
}

fn summary_line(query: &str, total_results: usize, processing_time: Option<f64>) -> String {
    match processing_time {
        Some(seconds) => format!("{total_results} results for \"{query}\" ({seconds:.2}s)"),
        None => format!("{total_results} results for \"{query}\""),
    }
}

fn print_item(item: &ResultItem) {
    println!("{}", headline(item).bright_blue().bold());
    if !item.description.is_empty() {
        println!("    {}", item.description);
    }
    if let Some(url) = &item.url {
        println!("    {}", url.bright_black());
    }
}

fn headline(item: &ResultItem) -> String {
    let mut line = format!("- {}", item.title);
    if let Some(price) = &item.price {
        line.push_str(&format!("  {price}"));
    }
    if let Some(rating) = &item.rating {
        line.push_str(&format!("  ★ {rating}"));
    }
    line
}
