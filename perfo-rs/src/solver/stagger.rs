use serde::{Deserialize, Serialize};

use crate::geometry::ShapeKind;

/// Row staggering of a layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaggerMode {
    /// All rows aligned
    #[default]
    None,
    /// Odd rows (0-based) shifted by half the horizontal pitch
    Half,
}

/// How a shape family behaves on staggered rows.
///
/// Dropping the last column keeps shifted rows inside the unshifted block, the reservation only
/// applies to shifted rows that keep all columns. With both flags set, `reserve_offset` has no effect.
/// Shifted rows that keep all columns without a reservation pass the far margin by half a pitch
/// (the engine fails when that leaves the sheet).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerPolicy {
    /// Shifted rows drop their last column so the pattern stays left/right symmetric
    pub drop_last_column: bool,
    /// Reserve half a pitch on X for the shift, widening the block solved on that axis
    pub reserve_offset: bool,
}

impl StaggerPolicy {
    /// Shifted rows keep all columns, no room reserved
    pub const KEEP: StaggerPolicy = StaggerPolicy {
        drop_last_column: false,
        reserve_offset: false,
    };

    /// Shifted rows drop their last column
    pub const DROP: StaggerPolicy = StaggerPolicy {
        drop_last_column: true,
        reserve_offset: false,
    };

    /// Shifted rows keep all columns and half a pitch is reserved for them,
    /// so the whole pattern is centered
    pub const RESERVE: StaggerPolicy = StaggerPolicy {
        drop_last_column: false,
        reserve_offset: true,
    };

    /// Whether half a pitch is reserved on X for shifted rows
    pub fn reserves_offset(&self) -> bool {
        self.reserve_offset && !self.drop_last_column
    }

    /// Number of shapes on a row shifted by `offset` when unshifted rows hold `base_count`
    pub fn row_count(&self, base_count: usize, offset: f64) -> usize {
        match offset > 0.0 && self.drop_last_column {
            true => base_count.saturating_sub(1),
            false => base_count,
        }
    }
}

/// One [`StaggerPolicy`] per shape family
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerRules {
    pub square: StaggerPolicy,
    pub diamond: StaggerPolicy,
    pub circle: StaggerPolicy,
    pub slot: StaggerPolicy,
}

impl StaggerRules {
    pub fn policy_for(&self, kind: ShapeKind) -> StaggerPolicy {
        match kind {
            ShapeKind::Square => self.square,
            ShapeKind::Diamond => self.diamond,
            ShapeKind::Circle => self.circle,
            ShapeKind::Slot => self.slot,
        }
    }
}

impl Default for StaggerRules {
    /// Diamonds and slots drop a column on shifted rows, squares and circles keep every column.
    fn default() -> Self {
        Self {
            square: StaggerPolicy::KEEP,
            diamond: StaggerPolicy::DROP,
            circle: StaggerPolicy::KEEP,
            slot: StaggerPolicy::DROP,
        }
    }
}

/// Horizontal shift of row `row_index`: half a pitch for odd rows in [`StaggerMode::Half`], zero otherwise.
pub fn row_offset(row_index: usize, pitch_x: f64, mode: StaggerMode) -> f64 {
    match (mode, row_index % 2) {
        (StaggerMode::Half, 1) => pitch_x / 2.0,
        _ => 0.0,
    }
}

/// [`StaggerPolicy::row_count`] under the default [`StaggerRules`] for `shape_kind`
pub fn row_count(base_count: usize, offset: f64, shape_kind: ShapeKind) -> usize {
    StaggerRules::default()
        .policy_for(shape_kind)
        .row_count(base_count, offset)
}
