//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::config::{Overrides, parse_width};
use crate::core::message::Sender;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  chatcode classify 'const x = 1;'          Print true/false
  chatcode classify --explain -             Read stdin, show which rule decided
  chatcode extract < answer.txt             Print {language, code} as JSON
  chatcode format -l py < snippet.py        Reformat code for display
  chatcode render < answer.txt              Classify, format and highlight a message
  chatcode transcript chat.json             Render a saved conversation
  chatcode completions bash                 Generate bash completions

ENVIRONMENT:
  CHATCODE_THEME   syntect theme for code blocks (default base16-ocean.dark)
  CHATCODE_WIDTH   wrap width for prose (default 100)
  NO_COLOR         disable colored output
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Detect, extract, format and highlight code in chat messages",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Wrap width for plain text (overrides CHATCODE_WIDTH)
    #[arg(long, global = true, value_parser = parse_width_arg)]
    pub width: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether text reads as code
    Classify {
        /// Text to classify ('-' or omitted reads stdin)
        text: Option<String>,
        /// Show which rule decided and the heuristic score
        #[arg(long)]
        explain: bool,
    },
    /// Extract the code body and detected language as JSON
    Extract {
        /// Text to extract from ('-' or omitted reads stdin)
        text: Option<String>,
    },
    /// Reformat a code body for display
    Format {
        /// Language of the code (aliases like py, js, rb are accepted)
        #[arg(short = 'l', long)]
        language: String,
        /// Code to format ('-' or omitted reads stdin)
        text: Option<String>,
    },
    /// Run a message through the full pipeline and print it
    Render {
        /// Message text ('-' or omitted reads stdin)
        text: Option<String>,
        /// Who wrote the message
        #[arg(long, value_enum, default_value_t = Sender::Ai)]
        sender: Sender,
    },
    /// Render a JSON conversation transcript
    Transcript {
        /// Path to a transcript file
        path: PathBuf,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

fn parse_width_arg(raw: &str) -> Result<usize, String> {
    parse_width(raw).map_err(|_| format!("expected a positive integer, got {:?}", raw))
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// Flag values that replace their environment counterparts.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            no_color: self.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_from_flags() {
        let args = Args::parse_from(["chatcode", "-vv", "classify", "x"]);
        assert_eq!(args.log_level(), "debug");
        let args = Args::parse_from(["chatcode", "classify", "-q", "x"]);
        assert_eq!(args.log_level(), "error");
        let args = Args::parse_from(["chatcode", "classify", "x"]);
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn flags_become_overrides() {
        let args = Args::parse_from(["chatcode", "--no-color", "--width", "40", "render", "hi"]);
        assert_eq!(
            args.overrides(),
            Overrides {
                width: Some(40),
                no_color: true,
            }
        );
        let args = Args::parse_from(["chatcode", "render", "hi"]);
        assert_eq!(args.overrides(), Overrides::default());
    }

    #[test]
    fn rejects_zero_width() {
        assert!(Args::try_parse_from(["chatcode", "--width", "0", "render", "hi"]).is_err());
    }

    #[test]
    fn render_sender_defaults_to_ai() {
        let args = Args::parse_from(["chatcode", "render", "hi"]);
        match args.command {
            Commands::Render { sender, .. } => assert_eq!(sender, Sender::Ai),
            _ => panic!("expected render"),
        }
    }
}
