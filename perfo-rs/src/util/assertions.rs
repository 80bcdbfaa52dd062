use log::error;

use crate::entities::LayoutResult;
use crate::solver::{AxisSolution, StaggerMode};
use crate::util::FPA;

//Various checks to verify correctness of the layouts produced by the engine
//Used in debug_assertion!() blocks

/// Both margins of an axis are equal and, together with the block, add up to the axis length.
pub fn axis_is_centered(available_length: f64, item_size: f64, sol: &AxisSolution) -> bool {
    block_is_centered(available_length, sol.occupied(item_size), sol.margin)
}

fn block_is_centered(available_length: f64, occupied: f64, margin: f64) -> bool {
    let centered = FPA(2.0 * margin + occupied) == FPA(available_length);
    if !centered {
        error!("block of {occupied} with margins {margin} does not fill {available_length}");
    }
    centered
}

pub fn layout_is_centered(layout: &LayoutResult) -> bool {
    block_is_centered(layout.sheet_width, layout.occupied_width(), layout.x.margin)
        && block_is_centered(
            layout.sheet_height,
            layout.occupied_height(),
            layout.y.margin,
        )
}

/// The shapes themselves lie `x.margin` and `y.margin` away from both edges of each axis.
///
/// Shifted rows that keep all columns without room reserved for them are the exception:
/// they pass the far X margin by half a pitch.
pub fn cells_are_centered(layout: &LayoutResult) -> bool {
    let (half_w, half_h) = (layout.bbox.width / 2.0, layout.bbox.height / 2.0);
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for cell in layout.cells() {
        let (cx, cy) = cell.center;
        x_min = x_min.min(cx - half_w);
        x_max = x_max.max(cx + half_w);
        y_min = y_min.min(cy - half_h);
        y_max = y_max.max(cy + half_h);
    }
    if layout.n_shapes() == 0 {
        return true;
    }

    let (left, right) = (x_min, layout.sheet_width - x_max);
    let (top, bottom) = (y_min, layout.sheet_height - y_max);
    let expected_right = layout.x.margin - unreserved_overhang(layout);
    let centered = FPA(left) == FPA(layout.x.margin)
        && FPA(right) == FPA(expected_right)
        && FPA(top) == FPA(layout.y.margin)
        && FPA(bottom) == FPA(layout.y.margin);
    if !centered {
        error!(
            "shapes leave margins ({left}, {right}) x ({top}, {bottom}), expected ({}, {expected_right}) x ({}, {})",
            layout.x.margin, layout.y.margin, layout.y.margin
        );
    }
    centered
}

fn unreserved_overhang(layout: &LayoutResult) -> f64 {
    let hangs = layout.stagger == StaggerMode::Half
        && layout.y.count > 1
        && !layout.stagger_policy.drop_last_column
        && layout.x.stagger_extra == 0.0;
    match hangs {
        true => layout.row_offset(1),
        false => 0.0,
    }
}

/// No shape crosses the sheet boundary.
pub fn cells_within_sheet(layout: &LayoutResult) -> bool {
    let (half_w, half_h) = (layout.bbox.width / 2.0, layout.bbox.height / 2.0);
    let zero = FPA(0.0);
    let outside = layout.cells().find(|cell| {
        let (cx, cy) = cell.center;
        FPA(cx - half_w) < zero
            || FPA(cy - half_h) < zero
            || FPA(cx + half_w) > FPA(layout.sheet_width)
            || FPA(cy + half_h) > FPA(layout.sheet_height)
    });
    match outside {
        Some(cell) => {
            error!("shape {cell:?} crosses the sheet boundary");
            false
        }
        None => true,
    }
}
