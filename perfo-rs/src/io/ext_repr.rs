use serde::{Deserialize, Serialize};

use crate::solver::StaggerMode;

/// External representation of a [`ShapeSpec`](crate::geometry::ShapeSpec).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtShape {
    /// Name of the shape family: `square`, `diamond`, `circle` or `slot`
    pub kind: String,
    /// Side (square, diamond), diameter (circle) or length (slot)
    pub size: f64,
    /// Width of a slot
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<f64>,
}

/// External representation of a [`SpacingPolicy`](crate::entities::SpacingPolicy).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtSpacing {
    pub min_gap: f64,
    /// Gap is fixed at `min_gap` if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_gap: Option<f64>,
    pub min_margin: f64,
    /// Margin unbounded from above if not specified.
    /// Equal to `min_margin` together with an absent `max_gap`: the pitch is stretched to hit the margin.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_margin: Option<f64>,
}

/// External representation of a [`GroupSpec`](crate::entities::GroupSpec).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtGroup {
    pub min_columns_per_group: usize,
    /// Searched up to the widest group fitting on the sheet if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_columns_per_group: Option<usize>,
    pub inter_group_gap: f64,
}

/// External representation of a [`Pattern`](crate::entities::Pattern): a layout request without its sheet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPattern {
    pub shape: ExtShape,
    pub spacing: ExtSpacing,
    #[serde(default)]
    pub stagger: StaggerMode,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group: Option<ExtGroup>,
}

/// External representation of a [`LayoutRequest`](crate::entities::LayoutRequest).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLayoutRequest {
    pub sheet_width: f64,
    pub sheet_height: f64,
    #[serde(flatten)]
    pub pattern: ExtPattern,
}

/// Banded part of an [`ExtLayout`]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtGroupLayout {
    pub columns_per_group: usize,
    pub groups: usize,
    pub group_width: f64,
    pub inter_group_gap: f64,
}

/// External representation of a [`LayoutResult`](crate::entities::LayoutResult).
/// Everything a downstream drawing or CNC stage needs to place the shapes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLayout {
    pub count_x: usize,
    pub count_y: usize,
    pub pitch_x: f64,
    pub pitch_y: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Room reserved on X for the shift of staggered rows
    pub stagger_extra_x: f64,
    pub stagger: StaggerMode,
    /// Horizontal shift of odd rows
    pub odd_row_offset: f64,
    pub even_row_count: usize,
    pub odd_row_count: usize,
    pub n_shapes: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub groups: Option<ExtGroupLayout>,
    /// Centers of all shapes, row by row. Only present when explicitly exported.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub centers: Vec<(f64, f64)>,
}
