//! Error types for rope construction and scene bookkeeping.

use crate::rope::RopeId;
use thiserror::Error;

/// Errors raised when building or looking up ropes.
///
/// The per-tick update never fails; degenerate geometry there is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RopeError {
    /// A rope needs at least one segment.
    #[error("rope needs at least 1 segment (got {segments})")]
    InsufficientSegments { segments: usize },

    /// Stiffness must be in (0, 1].
    #[error("stiffness must be in (0, 1]")]
    InvalidStiffness,

    /// Damping must be in (0, 1].
    #[error("damping must be in (0, 1]")]
    InvalidDamping,

    /// An endpoint coordinate was NaN or infinite.
    #[error("endpoint coordinates must be finite")]
    NonFiniteCoordinate,

    /// No rope with this id exists in the set.
    #[error("no rope with id {0}")]
    UnknownRope(RopeId),

    /// Every rope id has been handed out.
    #[error("rope ids exhausted")]
    IdsExhausted,
}

/// Result type for rope operations.
pub type RopeResult<T> = core::result::Result<T, RopeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn error_display() {
        let err = RopeError::InsufficientSegments { segments: 0 };
        assert_eq!(format!("{err}"), "rope needs at least 1 segment (got 0)");

        let err = RopeError::UnknownRope(RopeId(7));
        assert!(format!("{err}").contains('7'));
    }
}
