//! Generator frames.
//!
//! A frame is a generator body written as an explicit state machine. The
//! implementing struct holds every local the body needs across yields, and
//! `resume` is a `match` over the resume point that runs the next segment of
//! the body.
//!
//! ```ignore
//! struct Countdown { n: u32 }
//!
//! impl Frame for Countdown {
//!     type Item = u32;
//!
//!     fn resume(&mut self, at: ResumePoint) -> Result<Step<u32>, BodyError> {
//!         if at != ResumePoint::START {
//!             self.n -= 1;
//!         }
//!         if self.n == 0 {
//!             return Ok(Step::Return);
//!         }
//!         Ok(Step::Yield { value: self.n, resume_at: ResumePoint::new(1) })
//!     }
//! }
//! ```

use crate::error::BodyError;
use std::fmt;

// ============================================================================
// Resume Points
// ============================================================================

/// Identifies where a suspended body continues.
///
/// `START` is handed to the first resume; every later resume receives the
/// point named by the previous [`Step::Yield`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResumePoint(u32);

impl ResumePoint {
    /// Entry point of every body.
    pub const START: Self = Self(0);

    /// Creates a resume point from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true if this is the entry point.
    #[inline]
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResumePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// ============================================================================
// Step
// ============================================================================

/// Outcome of running one segment of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The body produced a value and suspended.
    Yield {
        /// The produced value.
        value: T,
        /// Where the body continues on the next resume.
        resume_at: ResumePoint,
    },
    /// The body ran to completion.
    Return,
}

impl<T> Step<T> {
    /// Shorthand for a yield.
    #[inline]
    pub fn yield_at(value: T, resume_at: ResumePoint) -> Self {
        Self::Yield { value, resume_at }
    }

    /// Returns true if this step yielded.
    #[inline]
    pub fn is_yield(&self) -> bool {
        matches!(self, Self::Yield { .. })
    }
}

// ============================================================================
// Frame Trait
// ============================================================================

/// A suspendable computation producing values of type `Item`.
///
/// Implementations are owned by exactly one [`crate::Generator`] and are
/// dropped without further resumes when the generator is closed or dropped.
pub trait Frame {
    /// The produced value type.
    type Item;

    /// Runs the body from `at` until the next yield, completion or failure.
    ///
    /// Never called again after returning `Step::Return` or `Err`.
    fn resume(&mut self, at: ResumePoint) -> Result<Step<Self::Item>, BodyError>;

    /// A short name used in log events.
    fn name(&self) -> &'static str {
        "<frame>"
    }
}

impl<F: Frame + ?Sized> Frame for Box<F> {
    type Item = F::Item;

    #[inline]
    fn resume(&mut self, at: ResumePoint) -> Result<Step<Self::Item>, BodyError> {
        (**self).resume(at)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// ============================================================================
// Tests
// ============================================================================
