//! # Stride Core
//!
//! Pull-driven lazy generators built on explicit state machines.
//!
//! A generator body is written as a [`Frame`]: a struct holding every local
//! the body needs across yields, plus a `resume` method that runs the next
//! segment of the body from a given [`ResumePoint`]. A [`Generator`] owns the
//! frame exclusively and drives it on demand:
//!
//! - **Lazy**: construction runs no body code
//! - **Pull-driven**: each [`Generator::advance`] runs exactly one segment
//! - **Single owner**: generators move but never clone; dropping one discards
//!   its frame without resuming it
//! - **Failure as data**: a body error or panic is reported by the
//!   `advance()` call that hit it, and the generator becomes `Failed`
//!
//! # Example
//!
//! ```
//! use stride_core::counter;
//!
//! let mut generator = counter(3);
//! let mut seen = Vec::new();
//! while generator.advance().unwrap() {
//!     seen.push(*generator.current().unwrap());
//! }
//! assert_eq!(seen, [0, 1, 2]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod counter;
pub mod error;
pub mod frame;
pub mod generator;
pub mod iterator;
pub mod state;

pub use builder::{from_fn, once, try_from_fn};
pub use counter::{CounterFrame, counter};
pub use error::{BodyError, BodyErrorKind, GeneratorError, StrideResult};
pub use frame::{Frame, ResumePoint, Step};
pub use generator::Generator;
pub use iterator::{GeneratorIter, IntoIter, Values};
pub use state::{GeneratorHeader, GeneratorState};

/// Stride version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
