#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;

use crate::models::args::{AppCommands, Cli};

use anyhow::Result;
use clap::Parser;
use plinth_logger::Telemetry;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let _telemetry = Telemetry::builder().name(env!("CARGO_PKG_NAME")).console(true).init()?;

    let cli = Cli::parse();

    let code = match cli.command {
        AppCommands::Deps { quiet, check } => {
            handlers::deps::check_dependencies(quiet, check.as_deref())
        },
    };

    Ok(code)
}
