#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for atemlos.
//!
//! `atemlos collect` scrapes lyrics into record files, `atemlos load`
//! builds the typed dataset from them, and `atemlos report` prints
//! statistics over it. Without a subcommand an interactive menu asks
//! which of the three to run.
//!
//! Uses `indicatif-log-bridge` (via [`atemlos_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod collect;
mod interactive;
mod load;
mod report;

use std::path::PathBuf;

use atemlos_config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "atemlos", about = "Lyrics scraping and analysis toolchain")]
struct Cli {
    /// Configuration file (defaults to `ATEMLOS_CONFIG` or `config/config.toml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape lyrics of the configured artists into record files
    Collect(collect::CollectArgs),
    /// Build the dataset from the record files and print row counts
    Load {
        /// Discard the cached dataset and re-parse every record file
        #[arg(long)]
        rebuild: bool,
    },
    /// Print dataset statistics
    Report(report::ReportArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = atemlos_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        return interactive::run(&multi, &config).await;
    };

    match command {
        Commands::Collect(args) => {
            collect::run(&multi, &config, &args).await?;
        }
        Commands::Load { rebuild } => {
            let dataset = load::run(&multi, &config, rebuild)?;
            load::print_counts(&dataset);
        }
        Commands::Report(args) => {
            let dataset = load::run(&multi, &config, false)?;
            report::print(&dataset, &args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use atemlos_analytics_models::AssociationMeasure;

    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["atemlos"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn collect_accepts_repeated_artists() {
        let cli = Cli::try_parse_from([
            "atemlos",
            "collect",
            "--artist",
            "Sia",
            "--artist",
            "Helene Fischer",
            "--max-pages",
            "2",
            "--config",
            "other.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        let Some(Commands::Collect(args)) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.artist, ["Sia", "Helene Fischer"]);
        assert_eq!(args.max_pages, Some(2));
        assert_eq!(args.delay, None);
    }

    #[test]
    fn report_parses_measure_names() {
        let cli = Cli::try_parse_from([
            "atemlos",
            "report",
            "--measure",
            "likelihood_ratio",
            "--year",
            "2014",
            "--keep-stopwords",
        ])
        .unwrap();

        let Some(Commands::Report(args)) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.measure, AssociationMeasure::LikelihoodRatio);
        assert_eq!(args.year, Some(2014));
        assert!(args.keep_stopwords);
        assert_eq!(args.top, 10);
    }

    #[test]
    fn unknown_measure_is_rejected() {
        assert!(Cli::try_parse_from(["atemlos", "report", "--measure", "dice"]).is_err());
    }

    #[test]
    fn load_rebuild_flag() {
        let cli = Cli::try_parse_from(["atemlos", "load", "--rebuild"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Load { rebuild: true })));
    }
}
