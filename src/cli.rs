//! Command-line interface implementation for woformat.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::line_ending::LineEnding;

/// Command-line arguments structure for woformat.
#[derive(Parser, Debug)]
#[command(author, version, about = "woformat: generates deployment descriptors from templates", long_about = None)]
pub struct Args {
    /// Configuration file, or a directory containing woformat.json / woformat.yml
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Directory the target paths are resolved against
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Directory holding the templates (defaults to the configuration's directory)
    #[arg(short, long, value_name = "TEMPLATES_DIR")]
    pub templates: Option<PathBuf>,

    /// Only generate targets matching this glob; may be repeated
    #[arg(long, value_name = "GLOB")]
    pub only: Vec<String>,

    /// Line terminator for filtered files: lf, crlf, cr or native.
    /// Overrides the configuration.
    #[arg(long, value_name = "LINE_ENDING")]
    pub line_ending: Option<LineEnding>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Prints the short help shown when required arguments are missing.
pub fn print_usage() -> std::io::Result<()> {
    Args::command()
        .help_template(
            r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
        )
        .print_help()
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                if let Err(err) = print_usage() {
                    eprintln!("Failed to print help: {err}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
