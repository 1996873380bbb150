use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carfinder_application::{SearchSession, SessionFactory};
use carfinder_infrastructure::ConfigService;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "carfinder")]
#[command(about = "Carfinder - search used cars with filters or plain language", long_about = None)]
struct Cli {
    /// Base URL of the catalog and AI service
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Search a local JSON car list instead of the catalog service
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the selectable facet values
    Options,
    /// Set filters, search once and print the matching cars
    Search(commands::search::SearchArgs),
    /// Ask the assistant in plain language and print the resulting search
    Ask {
        /// What you are looking for, e.g. "red SUV under 20000"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Interactive session with manual filters and chat
    Repl,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_session(cli: &Cli) -> Result<SearchSession> {
    let config = ConfigService::new().resolve_from_env(cli.api_base.clone())?;

    let factory = SessionFactory::new(config);
    let session = match &cli.data {
        Some(path) => factory.create_offline_session(path)?,
        None => factory.create_session()?,
    };
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = build_session(&cli)?;

    match cli.command {
        Commands::Options => commands::options::run(&session).await?,
        Commands::Search(args) => commands::search::run(&session, &args).await?,
        Commands::Ask { text } => commands::ask::run(&session, &text.join(" ")).await?,
        Commands::Repl => commands::repl::run(&session).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "carfinder",
            "options",
            "--api-base",
            "http://cars.local",
            "--data",
            "cars.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://cars.local"));
        assert_eq!(cli.data, Some(PathBuf::from("cars.json")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Options));
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["carfinder", "ask", "red", "SUV", "under", "20000"]).unwrap();
        match cli.command {
            Commands::Ask { text } => assert_eq!(text.join(" "), "red SUV under 20000"),
            _ => panic!("Expected ask"),
        }
    }

    #[test]
    fn test_ask_requires_text() {
        assert!(Cli::try_parse_from(["carfinder", "ask"]).is_err());
    }

    #[test]
    fn test_search_flags() {
        let cli = Cli::try_parse_from([
            "carfinder",
            "search",
            "--make",
            "Honda",
            "--min-price",
            "10000",
        ])
        .unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.make.as_deref(), Some("Honda"));
                assert_eq!(args.min_price.as_deref(), Some("10000"));
                assert!(args.color.is_none());
            }
            _ => panic!("Expected search"),
        }
    }
}
