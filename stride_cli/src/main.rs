//! Stride — pull every value out of a lazy counting generator.
//!
//! ```bash
//! stride                 # Value: 0 .. Value: 4
//! stride --max 3 -q      # values only
//! stride --fail-at 2     # body fails on the third advance
//! STRIDE_LOG=stride_core=trace stride
//! ```

mod args;
mod config;
mod demo;
mod error;
mod logging;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(run_cli(std::env::args_os(), &mut out))
}

/// Parses `argv`, runs the demonstration into `out` and returns the exit code.
fn run_cli<I, T, W>(argv: I, out: &mut W) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let parsed = match args::CliArgs::try_parse_from(argv) {
        Ok(a) => a,
        Err(e) => {
            let _ = e.print();
            return error::parse_exit_code(&e);
        }
    };

    logging::init(&parsed.log_filter);

    let config = config::RuntimeConfig::from_args(&parsed);
    tracing::debug!(?config, "configuration resolved");

    match demo::run(&config, out) {
        Ok(_) => error::EXIT_SUCCESS,
        Err(e) => error::report(&e),
    }
}
