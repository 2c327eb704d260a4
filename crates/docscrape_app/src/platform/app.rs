use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use docscrape_engine::{
    run_mode, CachedFetcher, Mode, ModeContext, ModeOutcome, ReqwestFetcher, ResponseCache,
    Session,
};
use log::LevelFilter;
use scrape_logging::{scrape_debug, scrape_error, scrape_info, scrape_warn};

use super::cli::Cli;
use super::config::{AppConfig, Paths};
use super::logging;
use super::output::control_output;
use super::progress::LogProgress;

/// Parses arguments, runs the selected mode and logs how it went.
pub fn run_app() -> ExitCode {
    run_app_with(Cli::parse())
}

/// Runs the mode selected by `cli`.
///
/// Failures of the mode itself are contained here: they are logged with their
/// full context and the run still ends with its completion message.
pub fn run_app_with(cli: Cli) -> ExitCode {
    let base_dir = cli
        .base_dir
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let config = cli.config.as_deref().map(AppConfig::load).transpose();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let (config, config_error) = match config {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let paths = config.paths(&base_dir);
    logging::initialize(&paths.logs, level);
    install_panic_logger();

    scrape_info!("Parser started");
    scrape_info!("Command line arguments: {:?}", cli);

    let succeeded = match config_error {
        Some(err) => {
            scrape_error!("Configuration error: {:?}", err);
            false
        }
        None => match panic::catch_unwind(AssertUnwindSafe(|| run(&cli, &config, &paths))) {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                scrape_error!("Parser failed: {:?}", err);
                false
            }
            // Already logged by the panic hook.
            Err(_) => false,
        },
    };

    scrape_info!("Parser finished");
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: &Cli, config: &AppConfig, paths: &Paths) -> anyhow::Result<()> {
    let mode = Mode::from(cli.mode);
    let urls = config.site_urls()?;

    let cache = ResponseCache::new(paths.cache.clone());
    if cli.clear_cache {
        let removed = cache
            .clear()
            .with_context(|| format!("cannot clear cache at {}", paths.cache.display()))?;
        scrape_info!("Cleared {} cached responses", removed);
    }
    let fetcher =
        ReqwestFetcher::new(config.fetch.clone()).context("cannot build HTTP client")?;
    let mut session = Session::new(CachedFetcher::new(fetcher, cache));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    let progress = LogProgress;
    let ctx = ModeContext {
        urls: &urls,
        downloads_dir: &paths.downloads,
        progress: &progress,
    };
    let outcome = runtime
        .block_on(run_mode(mode, &mut session, &ctx))
        .with_context(|| format!("{mode} mode stopped"))?;

    let failures = session.failures();
    if !failures.is_empty() {
        scrape_warn!("{} page(s) could not be loaded during this run", failures.len());
    }

    match outcome {
        ModeOutcome::Table(table) => {
            control_output(&table.into_rows(), cli.output, mode, &paths.results)?;
        }
        ModeOutcome::Saved(path) => scrape_debug!("{} mode saved {}", mode, path.display()),
        ModeOutcome::NoResult => scrape_warn!("{} mode produced no result", mode),
    }
    Ok(())
}

/// Routes panics through the logger, with a backtrace, instead of bare stderr.
fn install_panic_logger() {
    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        scrape_error!("Unexpected failure: {}\n{}", info, backtrace);
    }));
}
