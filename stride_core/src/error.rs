//! Error types and result definitions for stride.
//!
//! Two layers of failure exist:
//! - [`BodyError`]: raised by a generator body while producing a value
//! - [`GeneratorError`]: reported to the consumer by [`Generator::advance`]
//!
//! A body failure never escapes asynchronously. It is surfaced exactly once,
//! on the `advance()` call that resumed the failing body.
//!
//! [`Generator::advance`]: crate::Generator::advance

use std::any::Any;
use std::fmt;
use thiserror::Error;

/// The unified result type used throughout stride.
pub type StrideResult<T> = Result<T, GeneratorError>;

// ============================================================================
// Body Errors
// ============================================================================

/// Classification of a body failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyErrorKind {
    /// The body returned an error.
    Failed,
    /// The body panicked and the unwind was captured.
    Panic,
}

impl BodyErrorKind {
    /// Returns the display name for this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Failed => "BodyError",
            Self::Panic => "BodyPanic",
        }
    }
}

impl fmt::Display for BodyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failure raised while a generator body was producing a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct BodyError {
    /// What kind of failure this is.
    pub kind: BodyErrorKind,
    /// Human readable description.
    pub message: String,
}

impl BodyError {
    /// Creates an ordinary body failure.
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            kind: BodyErrorKind::Failed,
            message: message.into(),
        }
    }

    /// Creates a body failure from a captured panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self {
            kind: BodyErrorKind::Panic,
            message,
        }
    }

    /// Returns true if this failure came from a captured panic.
    #[inline]
    pub fn is_panic(&self) -> bool {
        self.kind == BodyErrorKind::Panic
    }
}

// ============================================================================
// Generator Errors
// ============================================================================

/// Errors reported by [`crate::Generator::advance`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// The generator was resumed while its body was still executing.
    #[error("generator already executing")]
    AlreadyRunning,

    /// The body failed; the generator is now in the `Failed` state.
    #[error("generator failed: {0}")]
    Failed(#[from] BodyError),

    /// A body asked to resume at an index the header cannot encode.
    #[error("resume index {0} exceeds the header capacity")]
    ResumeIndexOverflow(u32),
}

impl GeneratorError {
    /// Returns the underlying body failure, if any.
    #[inline]
    pub fn body_error(&self) -> Option<&BodyError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if this error ended the sequence.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::AlreadyRunning)
    }
}

// ============================================================================
// Tests
// ============================================================================
