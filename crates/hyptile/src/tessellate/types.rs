//! Tessellation configuration and errors.

use std::fmt;

/// Tessellation configuration (tolerances and bounds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TessellateCfg {
    /// Maximum pixel slack `|a−c| + |c−b| − |a−b|` for a flat interval.
    pub tolerance: f64,
    /// Random interior probes tried after the midpoint.
    pub probes: usize,
    /// Subdivision depth at which an interval is emitted as-is.
    pub max_depth: usize,
}

impl Default for TessellateCfg {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            probes: 4,
            max_depth: 24,
        }
    }
}

/// Errors raised while tracing polygons to the screen.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    InvalidCanvas { width: u32, height: u32 },
    Degenerate { reason: String },
}

impl TraceError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCanvas { width, height } => {
                write!(f, "canvas {width}x{height} too small: both sides must exceed 4 px")
            }
            Self::Degenerate { reason } => write!(f, "degenerate geometry: {reason}"),
        }
    }
}

impl std::error::Error for TraceError {}
