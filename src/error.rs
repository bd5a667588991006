//! Construction-time error types.
//!
//! The simulation itself has no fallible operations: collisions, block
//! removal and boundary handling are all total. What can go wrong is
//! handing a component a configuration that would produce undefined
//! animation or an empty grid, and those are rejected up front so the
//! defect surfaces at construction rather than as a stuck sprite.

use std::fmt;

/// Rejected component configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A sprite sheet was declared with no frames.
    ZeroFrameCount {
        /// Image tag of the offending sprite.
        tag: &'static str,
    },

    /// A sprite was declared with a zero frame cadence, which would make
    /// the frame timer advance every tick counter overflow instead of on
    /// a defined schedule.
    ZeroTicksPerFrame {
        /// Image tag of the offending sprite.
        tag: &'static str,
    },

    /// A shield base was declared with a zero-sized block grid.
    EmptyBlockGrid {
        /// Requested columns.
        width: usize,
        /// Requested rows.
        height: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFrameCount { tag } => {
                write!(f, "sprite '{}' declares a sheet with zero frames", tag)
            }
            ConfigError::ZeroTicksPerFrame { tag } => {
                write!(f, "sprite '{}' declares zero ticks per frame", tag)
            }
            ConfigError::EmptyBlockGrid { width, height } => write!(
                f,
                "shield base declares an empty {}x{} block grid",
                width, height
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Convenience alias for constructors that validate their configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
