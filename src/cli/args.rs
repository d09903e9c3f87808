//! Command-line argument parsing for the hookstream binary.

use std::path::PathBuf;

/// Where the session's frames come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Send a prompt to the configured backend
    Prompt(String),
    /// Replay a recorded SSE transcript from disk
    Replay(PathBuf),
}

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    pub source: InputSource,
    /// Directory for the JSON file store, if results should be saved
    pub save_dir: Option<PathBuf>,
    /// Print a single JSON object instead of human-readable output
    pub json: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run one generation session
    Generate(GenerateArgs),
    /// Arguments could not be understood; carries the reason
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: hookstream [OPTIONS] <PROMPT>...
       hookstream [OPTIONS] --replay <FILE>

Options:
  --replay <FILE>  Feed a recorded SSE transcript through a session
  --save <DIR>     Save completed results as JSON files under DIR
  --json           Print the outcome as one JSON object
  -V, --version    Print version
  -h, --help       Print this help";

/// Parse command-line arguments (program name first).
///
/// # Examples
///
/// ```
/// use hookstream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["hookstream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut replay: Option<PathBuf> = None;
    let mut save_dir: Option<PathBuf> = None;
    let mut json = false;
    let mut prompt_words: Vec<String> = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--json" => json = true,
            "--replay" => match args.next() {
                Some(path) => replay = Some(PathBuf::from(path)),
                None => return CliCommand::Invalid("--replay requires a file".to_string()),
            },
            "--save" => match args.next() {
                Some(dir) => save_dir = Some(PathBuf::from(dir)),
                None => return CliCommand::Invalid("--save requires a directory".to_string()),
            },
            flag if flag.starts_with("--") => {
                return CliCommand::Invalid(format!("unknown option {}", flag));
            }
            _ => prompt_words.push(arg),
        }
    }

    let source = match (replay, prompt_words.is_empty()) {
        (Some(_), false) => {
            return CliCommand::Invalid("use either --replay or a prompt, not both".to_string())
        }
        (Some(path), true) => InputSource::Replay(path),
        (None, false) => InputSource::Prompt(prompt_words.join(" ")),
        (None, true) => return CliCommand::Help,
    };

    CliCommand::Generate(GenerateArgs {
        source,
        save_dir,
        json,
    })
}
