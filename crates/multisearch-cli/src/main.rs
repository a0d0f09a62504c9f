use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use multisearch_core::presentation::SortOrder;
use multisearch_core::request::SearchType;
use std::path::PathBuf;

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "multisearch")]
#[command(about = "Multisearch - search products and services by text, voice transcript or image", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write daily rolling log files
    #[arg(long, global = true)]
    log_file: bool,

    /// Directory for log files (implies --log-file)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search and print the results
    Search {
        #[command(subcommand)]
        input: SearchInput,
    },
    /// Show query completions
    Suggest {
        query: String,
        #[arg(long = "type", value_enum)]
        search_type: Option<TypeArg>,
    },
    /// Show trending searches
    Trending {
        #[arg(long = "type", value_enum)]
        search_type: Option<TypeArg>,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SearchInput {
    /// Search typed text
    Text {
        query: String,
        #[command(flatten)]
        options: SearchOptions,
    },
    /// Search a voice transcript
    Voice {
        transcript: String,
        #[command(flatten)]
        options: SearchOptions,
    },
    /// Search by image file
    Image {
        file: PathBuf,
        #[command(flatten)]
        options: SearchOptions,
    },
}

#[derive(Args, Clone)]
struct SearchOptions {
    /// Category filter (defaults to the configured type)
    #[arg(long = "type", value_enum)]
    search_type: Option<TypeArg>,

    /// Search on behalf of this user id
    #[arg(long)]
    user: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// Ignore any location, including the configured fallback
    #[arg(long)]
    no_location: bool,

    #[arg(long, value_enum, default_value_t = SortArg::Relevance)]
    sort: SortArg,

    /// 1-based results page
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Print the final session state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Product,
    Service,
    All,
}

impl From<TypeArg> for SearchType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Product => SearchType::Product,
            TypeArg::Service => SearchType::Service,
            TypeArg::All => SearchType::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Relevance,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Relevance => SortOrder::Relevance,
            SortArg::PriceAsc => SortOrder::PriceAsc,
            SortArg::PriceDesc => SortOrder::PriceDesc,
            SortArg::RatingDesc => SortOrder::RatingDesc,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file || cli.log_dir.is_some(), cli.log_dir.clone())?;

    let config_service = commands::config_service(cli.config.as_deref())?;

    match cli.command {
        Commands::Search { input } => commands::search::run(&config_service, input).await?,
        Commands::Suggest { query, search_type } => {
            commands::suggest::suggestions(&config_service, &query, search_type.map(Into::into))
                .await?
        }
        Commands::Trending { search_type } => {
            commands::suggest::trending(&config_service, search_type.map(Into::into)).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config_service)?,
            ConfigAction::Path => commands::config::path(&config_service),
        },
    }

    Ok(())
}
