//! woformat's application entry point.
//! Parses arguments, loads the configuration and materializes every target.

use woformat::{
    cli::{get_args, Args},
    config::get_config,
    configured::ConfiguredFormat,
    copy::CopyEngine,
    error::{default_error_handler, Result},
    format::ProjectFormat,
    loader::DirectoryLoader,
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration
/// 2. Applies command-line overrides
/// 3. Resolves targets against the output directory
/// 4. Copies every template into place
fn run(args: Args) -> Result<()> {
    let (mut config, config_dir) = get_config(&args.config)?;
    if let Some(line_ending) = args.line_ending {
        config.line_ending = line_ending;
    }

    let engine = CopyEngine::new().with_line_ending(config.line_ending);
    let loader = DirectoryLoader::new(args.templates.unwrap_or(config_dir));

    let mut format = ConfiguredFormat::new(config, &args.output_dir)?;
    format.retain_matching(&args.only)?;

    let report = format.process_templates(&loader, &engine)?;

    println!(
        "Generated {} file(s) for '{}' in {}.",
        report.len(),
        format.name(),
        args.output_dir.display()
    );
    Ok(())
}
