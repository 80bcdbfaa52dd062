use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::LayoutError;
use crate::geometry::{Axis, ShapeKind};

/// Immutable description of a single cut-out shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    /// Side (square, diamond), diameter (circle) or length (slot)
    pub primary_size: f64,
    /// Width of a slot, equal to `primary_size` for every other kind
    pub secondary_size: f64,
}

impl ShapeSpec {
    /// Validates the dimensions and builds a new shape.
    /// `secondary_size` is only meaningful for slots and is ignored (set to `primary_size`) otherwise.
    pub fn try_new(
        kind: ShapeKind,
        primary_size: f64,
        secondary_size: Option<f64>,
    ) -> Result<Self, LayoutError> {
        if !(primary_size.is_finite() && primary_size > 0.0) {
            return Err(LayoutError::InvalidShape(format!(
                "{kind} requires a positive primary size, got {primary_size}"
            )));
        }
        let secondary_size = match kind {
            ShapeKind::Slot => {
                let width = secondary_size.ok_or_else(|| {
                    LayoutError::InvalidShape("slot requires a width".to_string())
                })?;
                if !(width.is_finite() && width > 0.0 && width <= primary_size) {
                    return Err(LayoutError::InvalidShape(format!(
                        "slot width must lie in (0, {primary_size}], got {width}"
                    )));
                }
                width
            }
            _ => primary_size,
        };
        Ok(Self {
            kind,
            primary_size,
            secondary_size,
        })
    }

    pub fn square(side: f64) -> Result<Self, LayoutError> {
        Self::try_new(ShapeKind::Square, side, None)
    }

    pub fn diamond(side: f64) -> Result<Self, LayoutError> {
        Self::try_new(ShapeKind::Diamond, side, None)
    }

    /// Diamond whose tip-to-tip distance (its bounding box) equals `diagonal`
    pub fn diamond_from_diagonal(diagonal: f64) -> Result<Self, LayoutError> {
        Self::try_new(ShapeKind::Diamond, diagonal / SQRT_2, None)
    }

    pub fn circle(diameter: f64) -> Result<Self, LayoutError> {
        Self::try_new(ShapeKind::Circle, diameter, None)
    }

    pub fn slot(length: f64, width: f64) -> Result<Self, LayoutError> {
        Self::try_new(ShapeKind::Slot, length, Some(width))
    }

    /// Tip-to-tip distance of a diamond, `None` for other kinds
    pub fn diagonal(&self) -> Option<f64> {
        match self.kind {
            ShapeKind::Diamond => Some(self.primary_size * SQRT_2),
            _ => None,
        }
    }

    /// Length of the straight segments of a slot, `None` for other kinds
    pub fn straight_length(&self) -> Option<f64> {
        match self.kind {
            ShapeKind::Slot => Some(self.primary_size - self.secondary_size),
            _ => None,
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        bounding_box(self)
    }
}

/// Axis-aligned envelope of a single shape instance in its nominal orientation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Extent of the box along `axis`
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Returns the [`BoundingBox`] a shape occupies.
pub fn bounding_box(shape: &ShapeSpec) -> BoundingBox {
    match shape.kind {
        ShapeKind::Square | ShapeKind::Circle => BoundingBox {
            width: shape.primary_size,
            height: shape.primary_size,
        },
        ShapeKind::Diamond => {
            let diagonal = shape.primary_size * SQRT_2;
            BoundingBox {
                width: diagonal,
                height: diagonal,
            }
        }
        ShapeKind::Slot => BoundingBox {
            width: shape.primary_size,
            height: shape.secondary_size,
        },
    }
}
