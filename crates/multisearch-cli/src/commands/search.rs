use anyhow::{Context, Result};
use colored::Colorize;
use multisearch_core::presentation::progress_at;
use multisearch_core::request::{ImageSource, LocationContext, SearchType};
use multisearch_core::state::SearchStatus;
use multisearch_infrastructure::ConfigService;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::build_app;
use crate::render;
use crate::{SearchInput, SearchOptions};

const PROGRESS_TICK: Duration = Duration::from_millis(250);

enum Query {
    Text(String),
    Voice(String),
    Image(PathBuf),
}

pub async fn run(config_service: &ConfigService, input: SearchInput) -> Result<()> {
    let (query, options) = match input {
        SearchInput::Text { query, options } => (Query::Text(query), options),
        SearchInput::Voice {
            transcript,
            options,
        } => (Query::Voice(transcript), options),
        SearchInput::Image { file, options } => (Query::Image(file), options),
    };

    let app = build_app(config_service)?;
    if let Some(user) = &options.user {
        app.identity().sign_in(user.clone());
    }
    if options.no_location {
        app.location().set_enabled(false);
    } else if let Some(location) = location_from(&options) {
        app.location().record(location);
    }

    let orchestrator = app.orchestrator();
    let search_type: Option<SearchType> = options.search_type.map(Into::into);
    let mut task = tokio::spawn(async move {
        match query {
            Query::Text(text) => orchestrator.handle_text_search(text, search_type).await,
            Query::Voice(transcript) => {
                orchestrator
                    .handle_voice_search(transcript, search_type)
                    .await
            }
            Query::Image(path) => {
                orchestrator
                    .handle_image_search(ImageSource::File(path), search_type)
                    .await
            }
        }
    });

    let started = Instant::now();
    let mut ticker = tokio::time::interval(PROGRESS_TICK);
    let mut shown_step = None;
    let joined = loop {
        tokio::select! {
            joined = &mut task => break joined,
            _ = ticker.tick(), if !options.json => {
                let progress = progress_at(started.elapsed());
                if app.store().state().is_loading()
                    && let Some(step) = progress.current_step()
                    && shown_step != Some(progress.step_index)
                {
                    shown_step = Some(progress.step_index);
                    eprintln!(
                        "{}",
                        format!("[{:>3.0}%] {}...", progress.percent, step.title).bright_black()
                    );
                }
            }
        }
    };
    let request_id = joined.context("Search task panicked")??;

    if let Some(destination) = app.navigator().current() {
        tracing::debug!("[CLI] Results view at {}", destination.to_path());
    }

    let state = app.store().state();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        render::print_state(
            &state,
            options.sort.into(),
            options.page,
            app.config().page_size,
        );
    }

    if state.status == SearchStatus::Error {
        anyhow::bail!("Search {} failed", request_id);
    }
    Ok(())
}

fn location_from(options: &SearchOptions) -> Option<LocationContext> {
    if options.lat.is_none()
        && options.lon.is_none()
        && options.city.is_none()
        && options.country.is_none()
    {
        return None;
    }
    Some(LocationContext {
        country: options.country.clone().unwrap_or_default(),
        city: options.city.clone().unwrap_or_default(),
        latitude: options.lat,
        longitude: options.lon,
        is_fallback: false,
    })
}
