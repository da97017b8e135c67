//! Iterator protocol for generators.
//!
//! Three adapters are provided:
//!
//! - [`IntoIter`]: consumes the generator, moves values out, yields a body
//!   failure as one `Err` item
//! - [`GeneratorIter`]: borrows the generator and yields clones, so
//!   `current()` stays valid between steps
//! - [`Values`]: consumes the generator, yields plain values and keeps the
//!   failure (if any) for inspection
//!
//! All three are fused: once `None` is returned, the body is never resumed
//! again.

use std::iter::FusedIterator;

use crate::error::GeneratorError;
use crate::generator::Generator;

// ============================================================================
// Consuming Iterator
// ============================================================================

/// Consuming iterator over a generator.
#[derive(Debug)]
pub struct IntoIter<T> {
    generator: Generator<T>,
}

impl<T> IntoIter<T> {
    /// Returns a reference to the underlying generator.
    #[inline]
    pub fn generator(&self) -> &Generator<T> {
        &self.generator
    }

    /// Returns the underlying generator.
    #[inline]
    pub fn into_inner(self) -> Generator<T> {
        self.generator
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = Result<T, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.generator.advance() {
            Ok(true) => self.generator.take_current().map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Generator<T> {
    type Item = Result<T, GeneratorError>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { generator: self }
    }
}

// ============================================================================
// Borrowing Iterator
// ============================================================================

/// Borrowing iterator over a generator.
#[derive(Debug)]
pub struct GeneratorIter<'a, T> {
    generator: &'a mut Generator<T>,
}

impl<T: Clone> Iterator for GeneratorIter<'_, T> {
    type Item = Result<T, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.generator.advance() {
            Ok(true) => self.generator.current().cloned().map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<T: Clone> FusedIterator for GeneratorIter<'_, T> {}

impl<'a, T: Clone> IntoIterator for &'a mut Generator<T> {
    type Item = Result<T, GeneratorError>;
    type IntoIter = GeneratorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        GeneratorIter { generator: self }
    }
}

// ============================================================================
// Value Iterator
// ============================================================================

/// Consuming iterator of plain values that stops at the first failure.
#[derive(Debug)]
pub struct Values<T> {
    generator: Generator<T>,
    error: Option<GeneratorError>,
}

impl<T> Values<T> {
    /// The failure that ended iteration, if any.
    #[inline]
    pub fn error(&self) -> Option<&GeneratorError> {
        self.error.as_ref()
    }

    /// Consumes the iterator, returning the failure that ended it.
    #[inline]
    pub fn into_error(self) -> Option<GeneratorError> {
        self.error
    }
}

impl<T> Iterator for Values<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.generator.advance() {
            Ok(true) => self.generator.take_current(),
            Ok(false) => None,
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}

impl<T> FusedIterator for Values<T> {}

impl<T> Generator<T> {
    /// Borrows the generator as an iterator of cloned values.
    #[inline]
    pub fn iter(&mut self) -> GeneratorIter<'_, T>
    where
        T: Clone,
    {
        GeneratorIter { generator: self }
    }

    /// Consumes the generator into an iterator of plain values.
    #[inline]
    pub fn values(self) -> Values<T> {
        Values {
            generator: self,
            error: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
