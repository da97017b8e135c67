//! The counting generator.
//!
//! `counter(max)` yields `0, 1, ..., max - 1`. The body is the loop
//!
//! ```text
//! for i in 0..max { yield i }
//! ```
//!
//! unrolled into a frame with two resume points: the loop entry and the
//! point just after the yield, where `i` is incremented.

use crate::error::BodyError;
use crate::frame::{Frame, ResumePoint, Step};
use crate::generator::Generator;

/// Frame state for [`counter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    i: i64,
    max: i64,
}

impl CounterFrame {
    /// Resume point just after `yield i`.
    pub const AFTER_YIELD: ResumePoint = ResumePoint::new(1);

    /// Creates a frame counting up to `max` (exclusive).
    #[inline]
    pub const fn new(max: i64) -> Self {
        Self { i: 0, max }
    }

    /// The bound fixed at creation time.
    #[inline]
    pub const fn max(&self) -> i64 {
        self.max
    }
}

impl Frame for CounterFrame {
    type Item = i64;

    fn resume(&mut self, at: ResumePoint) -> Result<Step<i64>, BodyError> {
        match at {
            ResumePoint::START => self.i = 0,
            Self::AFTER_YIELD => self.i += 1,
            other => {
                return Err(BodyError::new(format!(
                    "counter has no resume point {other}"
                )));
            }
        }
        if self.i < self.max {
            Ok(Step::yield_at(self.i, Self::AFTER_YIELD))
        } else {
            Ok(Step::Return)
        }
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}

/// Creates a generator yielding `0..max`. Yields nothing for `max <= 0`.
pub fn counter(max: i64) -> Generator<i64> {
    Generator::new(CounterFrame::new(max))
}
