//! Error taxonomy for maze generation.
//!
//! Only failures that cross the library boundary live here. An unreachable end cell is not an
//! error: the path finder reports it as [`None`] and the retry loop absorbs it.

use thiserror::Error;

/// Failures reported by the maze generation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The requested grid is too small to hold a border and a carved interior, or too large to
    /// allocate.
    ///
    /// Both dimensions must lie between [`MIN_DIMENSION`](crate::grid::MIN_DIMENSION) and
    /// [`MAX_DIMENSION`](crate::grid::MAX_DIMENSION). This is reported immediately and never
    /// retried.
    #[error(
        "invalid maze dimensions {width}x{height}: both must be between {min} and {max}",
        min = crate::grid::MIN_DIMENSION,
        max = crate::grid::MAX_DIMENSION
    )]
    InvalidDimensions {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// Every generation attempt was rejected.
    ///
    /// The retry loop gave up after regenerating the maze `attempts` times without producing a
    /// path of sufficient length.
    #[error("no acceptable maze found after {attempts} attempts")]
    ValidationExhausted {
        /// Number of mazes generated and rejected.
        attempts: usize,
    },
    /// A zero attempt budget was requested.
    #[error("the attempt budget must be at least 1")]
    ZeroAttempts,
    /// A colour argument could not be parsed as a hexadecimal RGB value.
    #[error("invalid colour `{0}`: expected `#rrggbb` or `0xrrggbb`")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = MazeError::InvalidDimensions {
            width: 4,
            height: 10,
        };

        assert_eq!(
            err.to_string(),
            "invalid maze dimensions 4x10: both must be between 5 and 10000"
        );
    }

    #[test]
    fn test_validation_exhausted_message() {
        let err = MazeError::ValidationExhausted { attempts: 12 };

        assert_eq!(
            err.to_string(),
            "no acceptable maze found after 12 attempts"
        );
    }

    #[test]
    fn test_invalid_color_message() {
        let err = MazeError::InvalidColor("teal".to_owned());

        assert!(err.to_string().contains("`teal`"));
    }
}
