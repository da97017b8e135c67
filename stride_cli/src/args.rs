//! Command-line arguments.
//!
//! Every flag can also be supplied through a `STRIDE_*` environment
//! variable; an explicit flag wins over the environment.

use clap::Parser;

/// Default counter bound, matching the classic demonstration.
pub const DEFAULT_MAX: i64 = 5;

/// Default log filter when neither `--log` nor `STRIDE_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Stride - drive a lazy counting generator and print every value.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "stride")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Upper bound (exclusive) of the counter.
    #[arg(short, long, env = "STRIDE_MAX", default_value_t = DEFAULT_MAX, allow_negative_numbers = true)]
    pub max: i64,

    /// Make the generator body fail when it reaches this value.
    #[arg(long, env = "STRIDE_FAIL_AT", value_name = "VALUE")]
    pub fail_at: Option<i64>,

    /// Suppress the banner line.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter directive (e.g. `debug`, `stride_core=trace`).
    #[arg(long = "log", env = "STRIDE_LOG", default_value = DEFAULT_LOG_FILTER, value_name = "FILTER")]
    pub log_filter: String,
}
