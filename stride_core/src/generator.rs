//! The generator handle.
//!
//! `Generator<T>` exclusively owns a boxed [`Frame`] and drives it one
//! segment at a time. The handle captures:
//!
//! - Execution state and resume index (via `GeneratorHeader`)
//! - The frame, present until the body completes, fails or is discarded
//! - The most recently yielded value
//!
//! # Consumer Protocol
//!
//! ```ignore
//! let mut generator = counter(3);
//! while generator.advance()? {
//!     println!("Value: {}", generator.current().unwrap());
//! }
//! ```
//!
//! Dropping or closing a generator discards its frame without resuming it,
//! so no body code runs past the last yield point.

use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use crate::error::{BodyError, GeneratorError, StrideResult};
use crate::frame::{Frame, ResumePoint, Step};
use crate::state::{GeneratorHeader, GeneratorState};

/// A lazily evaluated, pull-driven sequence of `T`.
///
/// Not `Clone`: a sequence has exactly one owner. Moving the handle moves the
/// frame; [`Generator::take`] moves it out of a place and leaves a detached
/// handle behind.
pub struct Generator<T> {
    header: GeneratorHeader,
    frame: Option<Box<dyn Frame<Item = T>>>,
    current: Option<T>,
    yielded: u64,
}

impl<T> Generator<T> {
    /// Creates a generator over `frame`.
    ///
    /// No body code runs until the first [`advance`](Self::advance).
    pub fn new<F>(frame: F) -> Self
    where
        F: Frame<Item = T> + 'static,
    {
        Self::from_boxed(Box::new(frame))
    }

    /// Creates a generator over an already boxed frame.
    pub fn from_boxed(frame: Box<dyn Frame<Item = T>>) -> Self {
        trace!(frame = frame.name(), "generator created");
        Self {
            header: GeneratorHeader::new(),
            frame: Some(frame),
            current: None,
            yielded: 0,
        }
    }

    /// Creates a detached generator: no frame, state `Closed`.
    ///
    /// This is the state a generator is left in after [`take`](Self::take).
    pub fn detached() -> Self {
        let mut header = GeneratorHeader::new();
        header.close();
        Self {
            header,
            frame: None,
            current: None,
            yielded: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // State Accessors
    // ═══════════════════════════════════════════════════════════════════════

    /// Returns the current generator state.
    #[inline]
    pub fn state(&self) -> GeneratorState {
        self.header.state()
    }

    /// Returns the resume index the body will continue at.
    #[inline]
    pub fn resume_index(&self) -> u32 {
        self.header.resume_index()
    }

    /// Returns true if the generator will never produce another value.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.header.state().is_finished()
    }

    /// Returns true if the generator still owns a frame.
    #[inline]
    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Number of values produced so far.
    #[inline]
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Returns the most recently produced value.
    ///
    /// `None` before the first successful `advance()` and once the sequence
    /// has ended.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Moves the most recently produced value out of the generator.
    #[inline]
    pub fn take_current(&mut self) -> Option<T> {
        self.current.take()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    /// Resumes the body until it yields, completes or fails.
    ///
    /// Returns `Ok(true)` when a new value is available through
    /// [`current`](Self::current), `Ok(false)` once the sequence is
    /// exhausted. A body failure (including a panic) is reported once as
    /// `Err(GeneratorError::Failed)`; the generator is `Failed` afterwards and
    /// further calls return `Ok(false)` without running body code.
    pub fn advance(&mut self) -> StrideResult<bool> {
        if self.header.try_start().is_none() {
            if self.header.is_running() {
                return Err(GeneratorError::AlreadyRunning);
            }
            return Ok(false);
        }
        self.current = None;

        let Some(frame) = self.frame.as_mut() else {
            self.header.close();
            return Ok(false);
        };

        let name = frame.name();
        let at = ResumePoint::new(self.header.resume_index());
        trace!(frame = name, resume_at = at.index(), "resuming frame");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| frame.resume(at)))
            .unwrap_or_else(|payload| Err(BodyError::from_panic(payload)));

        match outcome {
            Ok(Step::Yield { value, resume_at }) => {
                if !self.header.suspend(resume_at.index()) {
                    self.header.fail();
                    self.release_frame();
                    warn!(frame = name, resume_at = resume_at.index(), "resume index overflow");
                    return Err(GeneratorError::ResumeIndexOverflow(resume_at.index()));
                }
                self.current = Some(value);
                self.yielded += 1;
                trace!(frame = name, resume_at = resume_at.index(), "frame suspended");
                Ok(true)
            }
            Ok(Step::Return) => {
                self.header.complete();
                self.release_frame();
                debug!(frame = name, yielded = self.yielded, "generator completed");
                Ok(false)
            }
            Err(err) => {
                self.header.fail();
                self.release_frame();
                warn!(frame = name, error = %err, "generator body failed");
                Err(GeneratorError::Failed(err))
            }
        }
    }

    /// Discards the frame without resuming it.
    ///
    /// Returns true if a live frame was discarded. Closing a finished or
    /// detached generator is a no-op.
    pub fn close(&mut self) -> bool {
        self.current = None;
        self.header.close();
        match self.frame.as_ref().map(|frame| frame.name()) {
            Some(name) => {
                debug!(frame = name, yielded = self.yielded, "generator closed");
                self.release_frame();
                true
            }
            None => false,
        }
    }

    /// Drops the frame, containing any panic raised by its destructor.
    ///
    /// Callers move the header to its terminal state first.
    fn release_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        let name = frame.name();
        if panic::catch_unwind(AssertUnwindSafe(move || drop(frame))).is_err() {
            warn!(frame = name, "frame destructor panicked");
        }
    }

    /// Moves the generator out of this place, leaving a detached handle.
    ///
    /// The returned generator continues exactly where this one left off.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<T> Default for Generator<T> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<T> Drop for Generator<T> {
    fn drop(&mut self) {
        if let Some(name) = self.frame.as_ref().map(|frame| frame.name()) {
            trace!(
                frame = name,
                state = %self.header.state(),
                "discarding unfinished frame"
            );
            self.release_frame();
        }
    }
}

impl<T> fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("state", &self.state())
            .field("resume_index", &self.resume_index())
            .field("frame", &self.frame.as_ref().map(|frame| frame.name()))
            .field("yielded", &self.yielded)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Yields `0..limit`, counting how many segments ran and whether the
    /// frame was dropped.
    struct Probe {
        next: u32,
        limit: u32,
        runs: Rc<Cell<u32>>,
        drops: Rc<Cell<u32>>,
        fail_at: Option<u32>,
        panic_at: Option<u32>,
    }

    impl Probe {
        fn new(limit: u32) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>) {
            let runs = Rc::new(Cell::new(0));
            let drops = Rc::new(Cell::new(0));
            let probe = Self {
                next: 0,
                limit,
                runs: Rc::clone(&runs),
                drops: Rc::clone(&drops),
                fail_at: None,
                panic_at: None,
            };
            (probe, runs, drops)
        }
    }

    impl Frame for Probe {
        type Item = u32;

        fn resume(&mut self, _at: ResumePoint) -> Result<Step<u32>, BodyError> {
            self.runs.set(self.runs.get() + 1);
            if self.fail_at == Some(self.next) {
                return Err(BodyError::new(format!("failed at {}", self.next)));
            }
            if self.panic_at == Some(self.next) {
                panic!("probe panicked at {}", self.next);
            }
            if self.next == self.limit {
                return Ok(Step::Return);
            }
            let value = self.next;
            self.next += 1;
            Ok(Step::yield_at(value, ResumePoint::new(1)))
        }

        fn name(&self) -> &'static str {
            "probe"
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    struct Overflowing;

    impl Frame for Overflowing {
        type Item = ();

        fn resume(&mut self, _at: ResumePoint) -> Result<Step<()>, BodyError> {
            Ok(Step::yield_at((), ResumePoint::new(u32::MAX)))
        }
    }

    /// Yields one value, then returns; its destructor panics.
    struct PanicsOnDrop {
        done: bool,
    }

    impl Frame for PanicsOnDrop {
        type Item = u8;

        fn resume(&mut self, _at: ResumePoint) -> Result<Step<u8>, BodyError> {
            if self.done {
                return Ok(Step::Return);
            }
            self.done = true;
            Ok(Step::yield_at(1, ResumePoint::new(1)))
        }
    }

    impl Drop for PanicsOnDrop {
        fn drop(&mut self) {
            panic!("frame destructor failed");
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Construction Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_new_runs_no_body_code() {
        let (probe, runs, _) = Probe::new(3);
        let generator = Generator::new(probe);
        assert_eq!(runs.get(), 0);
        assert_eq!(generator.state(), GeneratorState::Created);
        assert!(generator.current().is_none());
        assert!(generator.has_frame());
    }

    #[test]
    fn test_detached_generator() {
        let mut generator: Generator<u8> = Generator::detached();
        assert_eq!(generator.state(), GeneratorState::Closed);
        assert!(!generator.has_frame());
        assert_eq!(generator.advance(), Ok(false));
        assert!(!generator.close());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Advance Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_advance_yields_in_order() {
        let (probe, _, drops) = Probe::new(3);
        let mut generator = Generator::new(probe);

        for expected in 0..3 {
            assert_eq!(generator.advance(), Ok(true));
            assert_eq!(generator.current(), Some(&expected));
            assert_eq!(generator.state(), GeneratorState::Suspended);
        }
        assert_eq!(generator.advance(), Ok(false));
        assert_eq!(generator.state(), GeneratorState::Completed);
        assert!(generator.current().is_none());
        assert_eq!(generator.yielded(), 3);
        // Frame released as soon as the body returned
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_advance_after_completion_runs_nothing() {
        let (probe, runs, _) = Probe::new(1);
        let mut generator = Generator::new(probe);
        assert_eq!(generator.advance(), Ok(true));
        assert_eq!(generator.advance(), Ok(false));
        let runs_at_end = runs.get();

        assert_eq!(generator.advance(), Ok(false));
        assert_eq!(generator.advance(), Ok(false));
        assert_eq!(runs.get(), runs_at_end);
    }

    #[test]
    fn test_resume_index_tracked() {
        let (probe, _, _) = Probe::new(2);
        let mut generator = Generator::new(probe);
        assert_eq!(generator.resume_index(), 0);
        generator.advance().unwrap();
        assert_eq!(generator.resume_index(), 1);
    }

    #[test]
    fn test_take_current() {
        let (probe, _, _) = Probe::new(2);
        let mut generator = Generator::new(probe);
        generator.advance().unwrap();
        assert_eq!(generator.take_current(), Some(0));
        assert_eq!(generator.current(), None);
        generator.advance().unwrap();
        assert_eq!(generator.current(), Some(&1));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_body_failure_reported_once() {
        let (mut probe, runs, drops) = Probe::new(5);
        probe.fail_at = Some(2);
        let mut generator = Generator::new(probe);

        assert_eq!(generator.advance(), Ok(true));
        assert_eq!(generator.advance(), Ok(true));
        let err = generator.advance().unwrap_err();
        assert_eq!(
            err.body_error().map(|e| e.message.as_str()),
            Some("failed at 2")
        );
        assert_eq!(generator.state(), GeneratorState::Failed);
        assert!(generator.current().is_none());
        assert_eq!(drops.get(), 1);

        let runs_at_failure = runs.get();
        assert_eq!(generator.advance(), Ok(false));
        assert_eq!(runs.get(), runs_at_failure);
    }

    #[test]
    fn test_body_panic_captured() {
        let (mut probe, _, drops) = Probe::new(5);
        probe.panic_at = Some(1);
        let mut generator = Generator::new(probe);

        assert_eq!(generator.advance(), Ok(true));
        let err = generator.advance().unwrap_err();
        let body = err.body_error().expect("panic should surface as body error");
        assert!(body.is_panic());
        assert!(body.message.contains("probe panicked at 1"));
        assert_eq!(generator.state(), GeneratorState::Failed);
        assert_eq!(drops.get(), 1);
        assert_eq!(generator.advance(), Ok(false));
    }

    #[test]
    fn test_resume_index_overflow_fails_generator() {
        let mut generator = Generator::new(Overflowing);
        assert_eq!(
            generator.advance(),
            Err(GeneratorError::ResumeIndexOverflow(u32::MAX))
        );
        assert_eq!(generator.state(), GeneratorState::Failed);
        assert!(!generator.has_frame());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Close / Drop Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_close_discards_without_resuming() {
        let (probe, runs, drops) = Probe::new(10);
        let mut generator = Generator::new(probe);
        generator.advance().unwrap();
        generator.advance().unwrap();

        assert!(generator.close());
        assert_eq!(runs.get(), 2);
        assert_eq!(drops.get(), 1);
        assert_eq!(generator.state(), GeneratorState::Closed);
        assert!(generator.current().is_none());
        assert_eq!(generator.advance(), Ok(false));
        assert!(!generator.close());
    }

    #[test]
    fn test_close_after_completion_keeps_completed() {
        let (probe, _, _) = Probe::new(0);
        let mut generator = Generator::new(probe);
        assert_eq!(generator.advance(), Ok(false));
        assert!(!generator.close());
        assert_eq!(generator.state(), GeneratorState::Completed);
    }

    #[test]
    fn test_drop_unstarted_releases_frame() {
        let (probe, runs, drops) = Probe::new(3);
        drop(Generator::new(probe));
        assert_eq!(runs.get(), 0);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_drop_suspended_releases_frame_once() {
        let (probe, runs, drops) = Probe::new(3);
        {
            let mut generator = Generator::new(probe);
            generator.advance().unwrap();
        }
        assert_eq!(runs.get(), 1);
        assert_eq!(drops.get(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Move Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_take_transfers_position() {
        let (probe, _, drops) = Probe::new(4);
        let mut source = Generator::new(probe);
        source.advance().unwrap();
        source.advance().unwrap();

        let mut dest = source.take();
        assert_eq!(source.state(), GeneratorState::Closed);
        assert!(!source.has_frame());
        assert_eq!(source.advance(), Ok(false));

        assert_eq!(dest.current(), Some(&1));
        assert_eq!(dest.advance(), Ok(true));
        assert_eq!(dest.current(), Some(&2));

        drop(source);
        assert_eq!(drops.get(), 0);
        drop(dest);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_assignment_releases_previous_frame() {
        let (first, _, first_drops) = Probe::new(3);
        let (second, _, second_drops) = Probe::new(3);

        let mut generator = Generator::new(first);
        generator.advance().unwrap();
        generator = Generator::new(second);
        assert_eq!(first_drops.get(), 1);
        assert_eq!(second_drops.get(), 0);

        assert_eq!(generator.advance(), Ok(true));
        assert_eq!(generator.current(), Some(&0));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Destructor Panic Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_completion_survives_panicking_frame_drop() {
        let mut generator = Generator::new(PanicsOnDrop { done: false });
        assert_eq!(generator.advance(), Ok(true));

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| generator.advance()));
        assert_eq!(outcome.ok(), Some(Ok(false)));
        assert_eq!(generator.state(), GeneratorState::Completed);
        assert!(!generator.has_frame());
        assert_eq!(generator.advance(), Ok(false));
    }

    #[test]
    fn test_failure_survives_panicking_frame_drop() {
        struct FailsThenPanicsOnDrop;

        impl Frame for FailsThenPanicsOnDrop {
            type Item = u8;

            fn resume(&mut self, _at: ResumePoint) -> Result<Step<u8>, BodyError> {
                Err(BodyError::new("no value"))
            }
        }

        impl Drop for FailsThenPanicsOnDrop {
            fn drop(&mut self) {
                panic!("frame destructor failed");
            }
        }

        let mut generator = Generator::new(FailsThenPanicsOnDrop);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| generator.advance()));
        assert!(matches!(outcome, Ok(Err(GeneratorError::Failed(_)))));
        assert_eq!(generator.state(), GeneratorState::Failed);
        assert_eq!(generator.advance(), Ok(false));
    }

    #[test]
    fn test_close_and_drop_contain_frame_drop_panic() {
        let mut generator = Generator::new(PanicsOnDrop { done: false });
        generator.advance().unwrap();
        let closed = panic::catch_unwind(AssertUnwindSafe(|| generator.close()));
        assert_eq!(closed.ok(), Some(true));
        assert_eq!(generator.state(), GeneratorState::Closed);

        let dropped = panic::catch_unwind(|| drop(Generator::new(PanicsOnDrop { done: false })));
        assert!(dropped.is_ok());
    }

    #[test]
    fn test_debug_output() {
        let (probe, _, _) = Probe::new(1);
        let generator = Generator::new(probe);
        let debug = format!("{:?}", generator);
        assert!(debug.contains("Created"));
        assert!(debug.contains("probe"));
    }
}
