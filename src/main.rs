//! # chatcode
//!
//! Command-line front end for detecting code in chat messages.
//!
//! ## Features
//! - Classify text as code or prose, with an optional score breakdown
//! - Extract fenced, inline, or bare code and detect its language
//! - Reformat code for display and print it as a highlighted block
//! - Render whole conversation transcripts

mod cli;
mod core;
mod run;
mod term;

use clap::Parser;
use dotenv::dotenv;

use cli::Args;

/// Main application entry point
///
/// Handles:
/// - Environment configuration via dotenv
/// - CLI argument parsing and logger setup
/// - Subcommand dispatch; failures print a message and exit with status 1
fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    // Print user-friendly message; exit uses Display not Debug
    let config = core::config::load(args.overrides()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    log::debug!("Config: {:?}", config);

    if let Err(e) = run::run(args, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
