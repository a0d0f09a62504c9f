use anyhow::Result;
use colored::Colorize;
use multisearch_core::request::SearchType;
use multisearch_infrastructure::ConfigService;

use super::build_app;

pub async fn suggestions(
    config_service: &ConfigService,
    query: &str,
    search_type: Option<SearchType>,
) -> Result<()> {
    let app = build_app(config_service)?;
    print_list("Suggestions", &app.suggestions(query, search_type).await);
    Ok(())
}

pub async fn trending(config_service: &ConfigService, search_type: Option<SearchType>) -> Result<()> {
    let app = build_app(config_service)?;
    print_list("Trending", &app.trending(search_type).await);
    Ok(())
}

fn print_list(title: &str, entries: &[String]) {
    if entries.is_empty() {
        println!("{}", format!("No {} available", title.to_lowercase()).bright_black());
        return;
    }
    println!("{}", title.bright_yellow());
    for entry in entries {
        println!("  - {entry}");
    }
}
