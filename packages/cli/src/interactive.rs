//! Interactive menu shown when `atemlos` runs without a subcommand.

use atemlos_analytics_models::AssociationMeasure;
use atemlos_cli_utils::MultiProgress;
use atemlos_config::Config;
use dialoguer::{Confirm, Input, Select};
use strum::IntoEnumIterator;

use crate::collect::{self, CollectArgs};
use crate::load;
use crate::report::{self, ReportArgs};

/// Top-level actions of the interactive menu.
enum Action {
    Collect,
    Load,
    Report,
}

impl Action {
    const ALL: &[Self] = &[Self::Collect, Self::Load, Self::Report];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Collect => "Collect lyrics",
            Self::Load => "Build dataset",
            Self::Report => "Show report",
        }
    }
}

/// Prompts for an action and its options, then runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected action fails.
pub async fn run(multi: &MultiProgress, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("atemlos");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Collect => {
            let args = prompt_collect(config)?;
            collect::run(multi, config, &args).await?;
        }
        Action::Load => {
            let rebuild = Confirm::new()
                .with_prompt("Discard the cached dataset and re-parse every file?")
                .default(false)
                .interact()?;
            let dataset = load::run(multi, config, rebuild)?;
            load::print_counts(&dataset);
        }
        Action::Report => {
            let args = prompt_report()?;
            let dataset = load::run(multi, config, false)?;
            report::print(&dataset, &args)?;
        }
    }

    Ok(())
}

fn prompt_collect(config: &Config) -> Result<CollectArgs, Box<dyn std::error::Error>> {
    let artists: String = Input::new()
        .with_prompt("Artists (comma-separated)")
        .default(config.scrape.artists.join(", "))
        .interact_text()?;

    let max_pages: u32 = Input::new()
        .with_prompt("Maximum pages per artist")
        .default(config.scrape.max_pages)
        .interact_text()?;

    let delay: u64 = Input::new()
        .with_prompt("Delay between songs (seconds)")
        .default(config.scrape.delay_secs)
        .interact_text()?;

    Ok(CollectArgs {
        artist: split_artists(&artists),
        max_pages: Some(max_pages),
        delay: Some(delay),
        ..CollectArgs::default()
    })
}

fn prompt_report() -> Result<ReportArgs, Box<dyn std::error::Error>> {
    let defaults = ReportArgs::default();

    let top: usize = Input::new()
        .with_prompt("Number of top words and hit songs")
        .default(defaults.top)
        .interact_text()?;

    let year = prompt_optional_i32("Reference year for top words (blank for all years)")?;

    let measures: Vec<AssociationMeasure> = AssociationMeasure::iter().collect();
    let labels: Vec<&str> = measures.iter().map(AsRef::as_ref).collect();
    let idx = Select::new()
        .with_prompt("Bigram association measure")
        .items(&labels)
        .default(0)
        .interact()?;

    let keep_stopwords = Confirm::new()
        .with_prompt("Count stop words?")
        .default(false)
        .interact()?;

    Ok(ReportArgs {
        top,
        year,
        measure: measures[idx],
        keep_stopwords,
        ..defaults
    })
}

fn prompt_optional_i32(prompt: &str) -> Result<Option<i32>, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    if input.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.trim().parse()?))
    }
}

/// Splits a comma-separated artist list, dropping blanks.
fn split_artists(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}
