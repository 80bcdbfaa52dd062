use thiserror::Error;

use crate::geometry::Axis;

/// Everything that can go wrong while computing a layout.
///
/// Configuration errors (`UnsupportedShapeKind`, `InvalidShape`, `InvalidSpacingPolicy`,
/// `InvalidSheet`, `InvalidGroupSpec`) are detected before any solving starts.
/// `SheetTooSmall` and `MarginUnreachable` are recoverable: the caller decides how to degrade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("unsupported shape kind: {0:?}")]
    UnsupportedShapeKind(String),
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    #[error("invalid spacing policy: {0}")]
    InvalidSpacingPolicy(String),
    #[error("invalid sheet: {0}")]
    InvalidSheet(String),
    #[error("invalid group spec: {0}")]
    InvalidGroupSpec(String),
    /// Not even a single shape fits between the minimum margins
    #[error("sheet too small along {axis}: {available} available, at least {required} required")]
    SheetTooSmall {
        axis: Axis,
        available: f64,
        required: f64,
    },
    /// The margin forced on an axis cannot be met within the allowed gaps
    #[error("margin {margin} unreachable along {axis}")]
    MarginUnreachable { axis: Axis, margin: f64 },
}
