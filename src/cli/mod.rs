//! CLI support for the hookstream binary.
//!
//! - Argument parsing
//! - Outcome rendering and exit codes
//! - Version display

pub mod args;
pub mod output;
pub mod version;

pub use args::{parse_args, CliCommand, GenerateArgs, InputSource, USAGE};
pub use output::{exit_code, render_json, render_text};
pub use version::{version_line, VERSION};
