//! Exit codes and error reporting for the CLI.

use stride_core::GeneratorError;

/// Successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// The generator failed or output could not be written.
pub const EXIT_ERROR: u8 = 1;

/// Invalid command line.
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Failure of a demonstration run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The generator body failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Writing to stdout failed.
    #[error("error writing output: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Generator(_) | Self::Io(_) => EXIT_ERROR,
        }
    }
}

/// Prints `err` to stderr and returns the matching exit code.
pub fn report(err: &RunError) -> u8 {
    eprintln!("stride: {}", err);
    err.exit_code()
}

/// Exit code for a command line that did not parse.
///
/// `--help` and `--version` also arrive as parse errors but are successes.
pub fn parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_USAGE_ERROR
    } else {
        EXIT_SUCCESS
    }
}
