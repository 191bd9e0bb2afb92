//! Jewel CLI - Command line tool for the storefront catalog search.
//!
//! Commands:
//! - `jewel search` - Run the full search pipeline for a query
//! - `jewel suggest` - Show dropdown suggestions only
//! - `jewel correct` - Show the "did you mean" correction only
//! - `jewel browse` - Filter, sort and page the collections view
//! - `jewel type` - Simulate keystrokes through the debounced search box
//! - `jewel catalog` - Inspect and validate catalogs
//! - `jewel config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    BrowseArgs, CatalogArgs, ConfigArgs, CorrectArgs, SearchArgs, SuggestArgs, TypeArgs,
};

/// Jewel CLI - Search and browse a jewellery catalog
#[derive(Parser)]
#[command(name = "jewel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog file to search instead of the configured one
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full search pipeline for a query
    Search(SearchArgs),

    /// Show dropdown suggestions for a query
    Suggest(SuggestArgs),

    /// Show the closest correction for a misspelled query
    Correct(CorrectArgs),

    /// Filter, sort and page the collections view
    Browse(BrowseArgs),

    /// Simulate typing into the debounced search box
    Type(TypeArgs),

    /// Inspect and validate catalogs
    Catalog(CatalogArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.catalog, output)?;
    ctx.init_tracing();

    // Execute command
    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Correct(args) => commands::correct::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Type(args) => commands::typing::run(args, &ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
