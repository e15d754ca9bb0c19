use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::args::RequestArgs;
use crate::config::{RequestConfig, apply_config, has_default_config, load_config};
use crate::error::AppResult;
use crate::output::{ProgressPrinter, ReportFormat, render, write_report};
use crate::runner::{ProgressReceiver, Runner};
use crate::shutdown::setup_signal_shutdown_handler;

/// Runs the CLI: parse arguments, merge the config file, run and report.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, when the HTTP
/// client or runtime cannot be built, or when the report cannot be written.
/// Failed requests are reported, not returned.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    if let Some(file) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &file)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(RequestArgs, ArgMatches)>> {
    let mut cmd = RequestArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = RequestArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

async fn run_async(args: RequestArgs) -> AppResult<()> {
    let config = RequestConfig::from_args(&args)?;
    let format = if args.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    let output_path = args.output.as_deref().map(Path::new);
    let stream = args.stream && format == ReportFormat::Text && output_path.is_none();
    if args.stream && !stream {
        warn!("--stream is ignored with --json or --output.");
    }

    let mut runner = Runner::new(config)?;
    let count = runner.config().count();
    let cancel = CancellationToken::new();
    let signal_handle = setup_signal_shutdown_handler(&cancel);

    let progress_task = match runner.progress() {
        Some(progress) if stream => {
            let color = !args.no_color && std::io::stderr().is_terminal();
            Some(tokio::spawn(print_progress(progress, count, color)))
        }
        Some(_) | None => None,
    };

    let result = runner.run(cancel.clone()).await;
    debug!(
        "Collected {} responses ({} errors)",
        result.total(),
        result.error_count()
    );

    if let Some(task) = progress_task {
        task.await??;
    }
    cancel.cancel();
    signal_handle.await?;

    let report = render(&result, format)?;
    if stream {
        write_report("\nFinal Results:\n", None)?;
    }
    write_report(&report, output_path)?;

    if result.has_errors() {
        warn!(
            "{} of {} requests failed",
            result.error_count(),
            result.total()
        );
    }
    Ok(())
}

async fn print_progress(
    mut progress: ProgressReceiver,
    total: usize,
    color: bool,
) -> AppResult<()> {
    let mut printer = ProgressPrinter::new(std::io::stderr(), total, color);
    printer.start()?;
    while let Some(event) = progress.recv().await {
        printer.event(&event)?;
    }
    printer.finish()
}
