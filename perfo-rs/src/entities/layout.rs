use itertools::Itertools;

use crate::geometry::{BoundingBox, ShapeSpec};
use crate::solver::{AxisSolution, GroupSolution, StaggerMode, StaggerPolicy, row_offset};

/// Grid descriptor produced by the [`LayoutEngine`](crate::solver::LayoutEngine).
///
/// Coordinates have their origin in a corner of the sheet, X along the width and Y along the height.
/// Row `r` starts at `margin_x + row_offset(r)` and lies at `margin_y + r * pitch_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutResult {
    pub sheet_width: f64,
    pub sheet_height: f64,
    pub shape: ShapeSpec,
    pub bbox: BoundingBox,
    /// Solution along the width. For banded layouts, `count` is the total number of columns.
    pub x: AxisSolution,
    /// Solution along the height, `count` is the number of rows
    pub y: AxisSolution,
    pub groups: Option<GroupSolution>,
    pub stagger: StaggerMode,
    pub stagger_policy: StaggerPolicy,
}

/// A single shape instance of a layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub row: usize,
    /// Index of the shape within its row
    pub column: usize,
    /// Center of the shape
    pub center: (f64, f64),
}

impl LayoutResult {
    pub fn count_x(&self) -> usize {
        self.x.count
    }

    pub fn count_y(&self) -> usize {
        self.y.count
    }

    /// Horizontal shift of row `row`
    pub fn row_offset(&self, row: usize) -> f64 {
        row_offset(row, self.x.pitch, self.stagger)
    }

    /// Number of shapes in each group of row `row` (the whole row when not banded)
    fn row_columns_per_group(&self, row: usize) -> usize {
        let base = match &self.groups {
            Some(g) => g.columns_per_group,
            None => self.x.count,
        };
        self.stagger_policy.row_count(base, self.row_offset(row))
    }

    /// Number of shapes in row `row`
    pub fn row_count(&self, row: usize) -> usize {
        let n_groups = self.groups.as_ref().map_or(1, |g| g.groups);
        n_groups * self.row_columns_per_group(row)
    }

    /// Total number of shapes on the sheet
    pub fn n_shapes(&self) -> usize {
        let n_rows = self.y.count;
        let even_rows = n_rows.div_ceil(2);
        let odd_rows = n_rows / 2;
        even_rows * self.row_count(0) + odd_rows * self.row_count(1)
    }

    /// Length along X covered by the tiled block, reserved stagger room included
    pub fn occupied_width(&self) -> f64 {
        match &self.groups {
            Some(g) => g.total_width(),
            None => self.x.occupied(self.bbox.width),
        }
    }

    /// Length along Y covered by the tiled block
    pub fn occupied_height(&self) -> f64 {
        self.y.occupied(self.bbox.height)
    }

    /// X coordinate of the left edge of the shape at (`group`, `column`) in an unshifted row
    fn column_x_min(&self, group: usize, column: usize) -> f64 {
        let group_start = self.groups.as_ref().map_or(0.0, |g| group as f64 * g.stride);
        self.x.margin + group_start + column as f64 * self.x.pitch
    }

    /// Iterates over all shapes of the layout, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n_groups = self.groups.as_ref().map_or(1, |g| g.groups);
        let (half_w, half_h) = (self.bbox.width / 2.0, self.bbox.height / 2.0);
        (0..self.y.count).flat_map(move |row| {
            let offset = self.row_offset(row);
            let y = self.y.margin + row as f64 * self.y.pitch + half_h;
            (0..n_groups)
                .cartesian_product(0..self.row_columns_per_group(row))
                .enumerate()
                .map(move |(column, (group, col_in_group))| Cell {
                    row,
                    column,
                    center: (
                        self.column_x_min(group, col_in_group) + offset + half_w,
                        y,
                    ),
                })
        })
    }
}
