//! Command dispatch: logger init, input reading, and one function per subcommand.

use std::io::{self, Read};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{self, Args, Commands};
use crate::core;
use crate::core::config::Config;
use crate::core::message::{Message, Sender};
use crate::term;

/// Initialize env_logger on stderr so stdout stays machine-readable.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Strip one trailing line ending, as left by shells and editors.
fn strip_trailing_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}

/// Text from the argument, or from stdin when the argument is absent or `-`.
fn read_input(text: Option<String>) -> io::Result<String> {
    match text {
        Some(t) if t != "-" => Ok(t),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            log::debug!("Read {} bytes from stdin", buf.len());
            Ok(strip_trailing_newline(buf))
        }
    }
}

fn run_classify(text: &str, explain: bool) {
    let verdict = core::classify::analyze(text);
    if explain {
        println!("{}\t{}", verdict.is_code(), verdict);
    } else {
        println!("{}", verdict.is_code());
    }
}

fn run_extract(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let unit = core::extract::extract(text);
    println!("{}", serde_json::to_string_pretty(&unit)?);
    Ok(())
}

fn run_format(text: &str, language: &str) {
    let token = language.trim().to_lowercase();
    let language = core::language::canonical_language(&token);
    println!("{}", core::format::format(text, language));
}

fn run_render(text: &str, sender: Sender, config: &Config) -> io::Result<()> {
    term::print_messages(&[Message::new(sender, text)], config)
}

fn run_transcript(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = core::transcript::load_transcript(path)?;
    if transcript.is_empty() {
        log::warn!("Transcript {} has no messages", path.display());
        return Ok(());
    }
    log::info!(
        "Rendering {} messages from {}",
        transcript.messages.len(),
        path.display()
    );
    term::print_messages(&transcript.messages, config)?;
    Ok(())
}

fn run_completions(shell: Shell) {
    let mut cmd = Args::command();
    cli::generate(shell, &mut cmd, core::app::NAME, &mut io::stdout());
}

/// Execute the parsed subcommand.
pub fn run(args: Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Commands::Classify { text, explain } => run_classify(&read_input(text)?, explain),
        Commands::Extract { text } => run_extract(&read_input(text)?)?,
        Commands::Format { language, text } => run_format(&read_input(text)?, &language),
        Commands::Render { text, sender } => run_render(&read_input(text)?, sender, config)?,
        Commands::Transcript { path } => run_transcript(&path, config)?,
        Commands::Completions { shell } => run_completions(shell),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_trailing_newline_removes_one_line_ending() {
        assert_eq!(strip_trailing_newline("a\n".to_string()), "a");
        assert_eq!(strip_trailing_newline("a\r\n".to_string()), "a");
        assert_eq!(strip_trailing_newline("a\n\n".to_string()), "a\n");
        assert_eq!(strip_trailing_newline("a".to_string()), "a");
    }

    #[test]
    fn read_input_prefers_argument() {
        assert_eq!(read_input(Some("x".to_string())).expect("read"), "x");
    }
}
