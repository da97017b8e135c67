//! The demonstration driver: build a counter, pull every value, print it.

use std::io::Write;

use stride_core::{BodyError, CounterFrame, Frame, Generator, ResumePoint, Step};
use tracing::info;

use crate::config::RuntimeConfig;
use crate::error::RunError;

/// Banner printed before the values.
pub const BANNER: &str = "Coroutine Generator Example:";

/// Counter frame that fails instead of yielding `fail_at`.
struct FaultyCounter {
    inner: CounterFrame,
    fail_at: i64,
}

impl Frame for FaultyCounter {
    type Item = i64;

    fn resume(&mut self, at: ResumePoint) -> Result<Step<i64>, BodyError> {
        match self.inner.resume(at)? {
            Step::Yield { value, .. } if value == self.fail_at => Err(BodyError::new(format!(
                "injected fault at value {}",
                value
            ))),
            step => Ok(step),
        }
    }

    fn name(&self) -> &'static str {
        "faulty_counter"
    }
}

/// Builds the generator described by `config`.
pub fn build_generator(config: &RuntimeConfig) -> Generator<i64> {
    match config.fail_at {
        Some(fail_at) => Generator::new(FaultyCounter {
            inner: CounterFrame::new(config.max),
            fail_at,
        }),
        None => stride_core::counter(config.max),
    }
}

/// Runs the demonstration, writing to `out`.
///
/// Returns the number of values printed.
pub fn run<W: Write>(config: &RuntimeConfig, out: &mut W) -> Result<u64, RunError> {
    if config.banner {
        writeln!(out, "{}", BANNER)?;
    }

    let mut generator = build_generator(config);
    while generator.advance()? {
        if let Some(value) = generator.current() {
            writeln!(out, "Value: {}", value)?;
        }
    }
    out.flush()?;

    info!(
        values = generator.yielded(),
        state = %generator.state(),
        "demonstration finished"
    );
    Ok(generator.yielded())
}
