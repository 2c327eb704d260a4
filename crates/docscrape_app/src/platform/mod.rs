//! Command-line front end: arguments, configuration, logging and output.
mod app;
mod cli;
mod config;
mod logging;
mod output;
mod progress;

pub use app::run_app;
