//! Runtime configuration built from parsed arguments.

use crate::args::CliArgs;

/// Settings for one run of the demonstration driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Counter bound (exclusive).
    pub max: i64,
    /// Value at which the generator body fails, if any.
    pub fail_at: Option<i64>,
    /// Print the banner line before the values.
    pub banner: bool,
}

impl RuntimeConfig {
    /// Builds the configuration from parsed arguments.
    ///
    /// A fault outside `0..max` can never trigger and is dropped.
    pub fn from_args(args: &CliArgs) -> Self {
        let fail_at = args.fail_at.filter(|k| (0..args.max).contains(k));
        if args.fail_at.is_some() && fail_at.is_none() {
            tracing::warn!(
                fail_at = args.fail_at,
                max = args.max,
                "fault outside the counter range is ignored"
            );
        }
        Self {
            max: args.max,
            fail_at,
            banner: !args.quiet,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max: crate::args::DEFAULT_MAX,
            fail_at: None,
            banner: true,
        }
    }
}
