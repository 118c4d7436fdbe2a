//! Felicific calculus command line
//!
//! Loads a scenario file, evaluates every candidate act and reports the one
//! the calculus prefers.

use clap::{Parser, ValueEnum};
use felicific_core::{CalculusError, SelectionMode};
use felicific_scenario::{default_config_toml, Scenario, ScenarioError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod report;

/// Command line arguments for the evaluator
#[derive(Parser, Debug)]
#[command(name = "felicific")]
#[command(about = "Rank candidate acts with Bentham's felicific calculus")]
struct Args {
    /// Scenario file (TOML)
    #[arg(required_unless_present = "print_default_config")]
    scenario: Option<PathBuf>,

    /// Override the scenario's selection mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Override the scenario's self-interest scale (0 = altruistic, 1 = egoistic)
    #[arg(long)]
    self_interest: Option<f64>,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,

    /// List every act tied with the winner
    #[arg(long)]
    list_ties: bool,

    /// Print a default `[evaluation]` configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Highest,
    Lowest,
    LeastNegative,
}

impl From<ModeArg> for SelectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Highest => SelectionMode::Highest,
            ModeArg::Lowest => SelectionMode::Lowest,
            ModeArg::LeastNegative => SelectionMode::LeastNegative,
        }
    }
}

/// Errors surfaced to the user.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Calculus(#[from] CalculusError),
    #[error("failed to encode evaluation as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Evaluates the scenario named by `args` and returns the text to print.
fn run(args: Args) -> Result<String, CliError> {
    if args.print_default_config {
        return Ok(default_config_toml());
    }

    let Some(path) = args.scenario.as_deref() else {
        return Ok(String::new());
    };
    let mut scenario = Scenario::from_file(path)?;
    apply_overrides(&mut scenario, &args);

    let selector = scenario.build()?;
    let evaluation = selector.evaluate(scenario.evaluation.mode)?;
    tracing::info!(
        "Selected '{}' out of {} acts",
        evaluation.selected.name,
        evaluation.scores.len()
    );

    if args.json {
        let mut json = serde_json::to_string_pretty(&evaluation)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(report::render_text(&evaluation, args.list_ties))
    }
}

/// Command line flags take precedence over the scenario's `[evaluation]` table.
fn apply_overrides(scenario: &mut Scenario, args: &Args) {
    if let Some(mode) = args.mode {
        scenario.evaluation.mode = mode.into();
    }
    if let Some(scale) = args.self_interest {
        scenario.evaluation.self_interest_scale = Some(scale);
    }
}
