//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the pretrained model (once, blocking)
//! - runs a one-shot estimate, the model inspection, or the interactive form

use clap::Parser;

use crate::cli::{Command, EstimateArgs, ModelArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `hp` binary.
pub fn run() -> Result<(), AppError> {
    // We want plain `hp` to behave like `hp tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the form-first UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let (client, model) = pipeline::load_model(args.model.model_url.as_deref())?;

    let features = args.to_features();
    let out = pipeline::run_estimate(&model, &features)
        .map_err(|e| AppError::runtime(format!("Prediction failed: {e}")))?;

    println!(
        "{}",
        crate::report::format_estimate_summary(&out, &model, client.url())
    );
    Ok(())
}

fn handle_inspect(args: ModelArgs) -> Result<(), AppError> {
    let (client, model) = pipeline::load_model(args.model_url.as_deref())?;

    println!("{}", crate::report::format_model_info(&model, client.url()));
    Ok(())
}

/// Rewrite argv so `hp` defaults to `hp tui`.
///
/// Rules:
/// - `hp`                      -> `hp tui`
/// - `hp --model-url U`        -> `hp tui --model-url U`
/// - `hp --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "estimate" | "inspect" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
