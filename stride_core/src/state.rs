//! Generator state management.
//!
//! `GeneratorHeader` packs the lifecycle state AND the resume index into a
//! single `u32`, so one load answers both "may this generator run?" and
//! "where does its body continue?".
//!
//! # Encoding
//!
//! ```text
//! Bits 0-2:  State (Created=0, Running=1, Suspended=2, Completed=3, Failed=4, Closed=5)
//! Bits 3-31: Resume index (yield point ID, max 2^29 - 1)
//! ```
//!
//! # Transitions
//!
//! ```text
//! Created ──advance──▶ Running ──yield──▶ Suspended ──advance──▶ Running ...
//!                         │                   │
//!                         ├──return──▶ Completed
//!                         ├──error───▶ Failed
//!                                             └──close/drop──▶ Closed
//! ```

use std::fmt;

// ============================================================================
// Generator State
// ============================================================================

/// Generator execution state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorState {
    /// Created but never resumed; no body code has run.
    #[default]
    Created = 0,
    /// The body is currently executing (reentry check).
    Running = 1,
    /// Suspended at a yield point with a value available.
    Suspended = 2,
    /// The body ran to completion.
    Completed = 3,
    /// The body raised a failure.
    Failed = 4,
    /// The frame was discarded before the body completed.
    Closed = 5,
}

impl GeneratorState {
    /// Number of bits used to encode state.
    pub const BITS: u32 = 3;

    /// Mask for extracting state from header.
    pub const MASK: u32 = (1 << Self::BITS) - 1;

    /// Creates state from raw bits. Unused encodings decode as `Closed`.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & Self::MASK {
            0 => Self::Created,
            1 => Self::Running,
            2 => Self::Suspended,
            3 => Self::Completed,
            4 => Self::Failed,
            _ => Self::Closed,
        }
    }

    /// Returns true if the generator can be resumed.
    #[inline(always)]
    pub const fn is_resumable(self) -> bool {
        matches!(self, Self::Created | Self::Suspended)
    }

    /// Returns true if the generator will never produce another value.
    #[inline(always)]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Closed)
    }

    /// Returns true if a current value is available in this state.
    #[inline(always)]
    pub const fn has_value(self) -> bool {
        matches!(self, Self::Suspended)
    }

    /// Returns the display name for this state.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Created => "GEN_CREATED",
            Self::Running => "GEN_RUNNING",
            Self::Suspended => "GEN_SUSPENDED",
            Self::Completed => "GEN_COMPLETED",
            Self::Failed => "GEN_FAILED",
            Self::Closed => "GEN_CLOSED",
        }
    }
}

impl fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Generator Header
// ============================================================================

/// Tagged header combining state and resume index.
///
/// ```text
/// +-------------------+-------+
/// | Resume Index (29) | State |
/// |                   | (3)   |
/// +-------------------+-------+
/// MSB                       LSB
/// ```
///
/// Each generator owns exactly one header.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct GeneratorHeader {
    bits: u32,
}

impl GeneratorHeader {
    /// Maximum resume index (2^29 - 1).
    pub const MAX_RESUME_INDEX: u32 = (1 << (32 - GeneratorState::BITS)) - 1;

    const RESUME_SHIFT: u32 = GeneratorState::BITS;

    /// Creates a new header in Created state with resume index 0.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: GeneratorState::Created as u32,
        }
    }

    /// Creates a header with specific state and resume index.
    #[inline]
    pub fn with_state_and_index(state: GeneratorState, resume_index: u32) -> Self {
        debug_assert!(resume_index <= Self::MAX_RESUME_INDEX);
        Self {
            bits: (resume_index << Self::RESUME_SHIFT) | (state as u32),
        }
    }

    /// Gets the current state.
    #[inline(always)]
    pub const fn state(&self) -> GeneratorState {
        GeneratorState::from_bits(self.bits)
    }

    /// Gets the current resume index.
    #[inline(always)]
    pub const fn resume_index(&self) -> u32 {
        self.bits >> Self::RESUME_SHIFT
    }

    /// Gets both state and resume index.
    #[inline(always)]
    pub const fn state_and_index(&self) -> (GeneratorState, u32) {
        (GeneratorState::from_bits(self.bits), self.bits >> Self::RESUME_SHIFT)
    }

    #[inline]
    fn set_state(&mut self, state: GeneratorState) {
        self.bits = (self.bits & !GeneratorState::MASK) | (state as u32);
    }

    /// Transitions to Running if currently resumable.
    /// Returns the previous state on success, `None` otherwise.
    #[inline]
    pub fn try_start(&mut self) -> Option<GeneratorState> {
        let old_state = self.state();
        if !old_state.is_resumable() {
            return None;
        }
        self.set_state(GeneratorState::Running);
        Some(old_state)
    }

    /// Transitions Running → Suspended with a new resume index.
    ///
    /// Returns `false` (and leaves the header untouched) if the index does
    /// not fit.
    #[inline]
    pub fn suspend(&mut self, resume_index: u32) -> bool {
        debug_assert_eq!(self.state(), GeneratorState::Running);
        if resume_index > Self::MAX_RESUME_INDEX {
            return false;
        }
        self.bits = (resume_index << Self::RESUME_SHIFT) | (GeneratorState::Suspended as u32);
        true
    }

    /// Transitions to Completed.
    #[inline]
    pub fn complete(&mut self) {
        // Resume index kept for debugging
        self.set_state(GeneratorState::Completed);
    }

    /// Transitions to Failed.
    #[inline]
    pub fn fail(&mut self) {
        self.set_state(GeneratorState::Failed);
    }

    /// Transitions to Closed. Finished headers keep their terminal state.
    #[inline]
    pub fn close(&mut self) {
        if !self.state().is_finished() {
            self.set_state(GeneratorState::Closed);
        }
    }

    /// Returns true if the body is executing.
    #[inline(always)]
    pub const fn is_running(&self) -> bool {
        matches!(self.state(), GeneratorState::Running)
    }

    /// Returns the raw bits (for debugging).
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.bits
    }
}

impl Default for GeneratorHeader {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (state, index) = self.state_and_index();
        f.debug_struct("GeneratorHeader")
            .field("state", &state)
            .field("resume_index", &index)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
