use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// One of the two axes of the sheet.
/// `X` runs along the sheet width (the rows), `Y` along the sheet height (the columns).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// The families of cut-out shapes the engine knows how to tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned square, `primary_size` is the side
    Square,
    /// Square rotated by 45°, `primary_size` is the side
    Diamond,
    /// Circle, `primary_size` is the diameter
    Circle,
    /// Stadium (rectangle with two semicircular caps), `primary_size` is the length, `secondary_size` the width
    Slot,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Square,
        ShapeKind::Diamond,
        ShapeKind::Circle,
        ShapeKind::Slot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Circle => "circle",
            ShapeKind::Slot => "slot",
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| LayoutError::UnsupportedShapeKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>().unwrap(), kind);
        }
        assert_eq!(" Slot ".parse::<ShapeKind>().unwrap(), ShapeKind::Slot);
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let err = "hexagon".parse::<ShapeKind>().unwrap_err();
        assert_eq!(err, LayoutError::UnsupportedShapeKind("hexagon".into()));
    }
}
