use anyhow::Context;
use box_renamer::commands::{run, write_report};
use box_renamer::config::Cli;
use box_renamer::executor::RenameEvent;
use box_renamer::ui::{print_summary, ProgressReporter};
use box_renamer::{logging, Config};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Mutex;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    // A missing log file never stops the run
    let log_path = match logging::init_file_logging(&config.log_dir, box_renamer::PROGRAM_NAME) {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!(
                "There was a problem creating the logging directory ({}). \
                 Make sure that you have permission to write to it. Continuing without a log file.",
                err
            );
            None
        }
    };

    let reporter = Mutex::new(ProgressReporter::new(config.quiet));
    let on_event = |event: &RenameEvent| {
        if let Ok(mut progress) = reporter.lock() {
            progress.handle(event);
        }
    };

    let result = run(&config, Some(&on_event)).context("rename run could not start")?;

    if let Some(report_path) = &config.report {
        if let Err(err) = write_report(report_path, &result) {
            eprintln!("Could not write report to {}: {}", report_path.display(), err);
        }
    }

    print_summary(&result, log_path.as_deref());

    Ok(ExitCode::from(result.exit_code() as u8))
}
