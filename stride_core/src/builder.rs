//! Frames for bodies whose persisted state fits in a closure.
//!
//! A closure-backed body has a single resume point: every resume calls the
//! closure once, and the closure's captured variables play the role of the
//! frame's locals.

use crate::error::BodyError;
use crate::frame::{Frame, ResumePoint, Step};
use crate::generator::Generator;

const AFTER_YIELD: ResumePoint = ResumePoint::new(1);

/// Frame driving an infallible closure.
pub struct FromFn<F> {
    f: F,
}

impl<T, F> Frame for FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    #[inline]
    fn resume(&mut self, _at: ResumePoint) -> Result<Step<T>, BodyError> {
        Ok(match (self.f)() {
            Some(value) => Step::yield_at(value, AFTER_YIELD),
            None => Step::Return,
        })
    }

    fn name(&self) -> &'static str {
        "from_fn"
    }
}

/// Frame driving a fallible closure.
pub struct TryFromFn<F> {
    f: F,
}

impl<T, F> Frame for TryFromFn<F>
where
    F: FnMut() -> Result<Option<T>, BodyError>,
{
    type Item = T;

    #[inline]
    fn resume(&mut self, _at: ResumePoint) -> Result<Step<T>, BodyError> {
        Ok(match (self.f)()? {
            Some(value) => Step::yield_at(value, AFTER_YIELD),
            None => Step::Return,
        })
    }

    fn name(&self) -> &'static str {
        "try_from_fn"
    }
}

/// Frame yielding a single value.
pub struct Once<T> {
    value: Option<T>,
}

impl<T> Frame for Once<T> {
    type Item = T;

    fn resume(&mut self, _at: ResumePoint) -> Result<Step<T>, BodyError> {
        Ok(match self.value.take() {
            Some(value) => Step::yield_at(value, AFTER_YIELD),
            None => Step::Return,
        })
    }

    fn name(&self) -> &'static str {
        "once"
    }
}

/// Creates a generator that calls `f` on every advance until it returns `None`.
pub fn from_fn<T, F>(f: F) -> Generator<T>
where
    F: FnMut() -> Option<T> + 'static,
    T: 'static,
{
    Generator::new(FromFn { f })
}

/// Like [`from_fn`], but a returned error ends the sequence as `Failed`.
pub fn try_from_fn<T, F>(f: F) -> Generator<T>
where
    F: FnMut() -> Result<Option<T>, BodyError> + 'static,
    T: 'static,
{
    Generator::new(TryFromFn { f })
}

/// Creates a generator that yields `value` once.
pub fn once<T: 'static>(value: T) -> Generator<T> {
    Generator::new(Once { value: Some(value) })
}
