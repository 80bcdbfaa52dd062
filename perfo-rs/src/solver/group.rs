use std::cmp::Ordering;

use log::{debug, trace};

use crate::entities::{GroupSpec, MarginBand, MarginScore};
use crate::solver::{AxisSolution, SolverFailure, iteration_cap};
use crate::util::{FPA, GroupSearch, SolverConfig};

/// Banded tiling of one axis: `groups` bands of `columns_per_group` shapes each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSolution {
    pub columns_per_group: usize,
    pub groups: usize,
    /// Pitch between shapes of the same group
    pub pitch: f64,
    pub inter_group_gap: f64,
    /// Length covered by a single group
    pub group_width: f64,
    /// Distance between the starts of consecutive groups
    pub stride: f64,
    pub margin: f64,
}

impl GroupSolution {
    fn evaluate(
        available_length: f64,
        item_size: f64,
        gap: f64,
        columns_per_group: usize,
        inter_group_gap: f64,
    ) -> Self {
        let group_width = columns_per_group as f64 * item_size + (columns_per_group - 1) as f64 * gap;
        let stride = group_width + inter_group_gap;
        let groups = (((available_length + inter_group_gap) / stride).floor() as usize).max(1);
        let total_width = groups as f64 * group_width + (groups - 1) as f64 * inter_group_gap;
        Self {
            columns_per_group,
            groups,
            pitch: item_size + gap,
            inter_group_gap,
            group_width,
            stride,
            margin: (available_length - total_width) / 2.0,
        }
    }

    pub fn total_columns(&self) -> usize {
        self.groups * self.columns_per_group
    }

    /// Length covered by all groups and the gaps between them
    pub fn total_width(&self) -> f64 {
        self.groups as f64 * self.group_width + (self.groups - 1) as f64 * self.inter_group_gap
    }

    /// The axis seen as a flat row of `total_columns()` shapes
    pub fn axis_solution(&self) -> AxisSolution {
        AxisSolution {
            count: self.total_columns(),
            pitch: self.pitch,
            margin: self.margin,
            stagger_extra: 0.0,
        }
    }

    /// Better margin first, then more shapes in total, then wider groups
    fn cmp_preference(&self, score: &MarginScore, other: &Self, other_score: &MarginScore) -> Ordering {
        score
            .compare(other_score)
            .then_with(|| other.total_columns().cmp(&self.total_columns()))
            .then_with(|| other.columns_per_group.cmp(&self.columns_per_group))
    }
}

/// Searches the number of columns per group whose margin fits `band` best.
///
/// Every column count from `spec.min_columns_per_group` up to the largest single group fitting between
/// the minimum margins is evaluated (capped by `spec.max_columns_per_group`). With [`GroupSearch::EarlyExit`]
/// the search stops at the first count whose margin falls below the floor.
pub fn solve_grouped_axis(
    available_length: f64,
    item_size: f64,
    gap: f64,
    spec: &GroupSpec,
    band: MarginBand,
    config: &SolverConfig,
) -> Result<GroupSolution, SolverFailure> {
    let pitch = item_size + gap;
    let min_columns = spec.min_columns_per_group.max(1);
    let min_group_width = min_columns as f64 * item_size + (min_columns - 1) as f64 * gap;
    let too_small = SolverFailure::SheetTooSmall {
        available: available_length,
        required: min_group_width + 2.0 * band.min,
    };
    if FPA(available_length) < FPA(item_size + 2.0 * band.min) {
        return Err(too_small);
    }

    let fitting_columns = usize::min(
        ((available_length - item_size - 2.0 * band.min) / pitch + FPA::EPSILON).floor() as usize + 1,
        iteration_cap(available_length, pitch),
    );
    let max_columns = spec
        .max_columns_per_group
        .map_or(fitting_columns, |m| m.min(fitting_columns));

    let mut best: Option<(GroupSolution, MarginScore)> = None;
    for columns in min_columns..=max_columns {
        let candidate = GroupSolution::evaluate(
            available_length,
            item_size,
            gap,
            columns,
            spec.inter_group_gap,
        );
        if FPA(candidate.margin) < FPA(band.min) {
            trace!(
                "[GROUP] {columns} columns: margin {:.4} below floor",
                candidate.margin
            );
            match config.group_search {
                GroupSearch::EarlyExit => break,
                GroupSearch::Exhaustive => continue,
            }
        }
        let score = band.score(candidate.margin);
        let improves = match &best {
            None => true,
            Some((b, b_score)) => candidate.cmp_preference(&score, b, b_score) == Ordering::Less,
        };
        if improves {
            trace!(
                "[GROUP] better: {} x {columns} columns, margin {:.4}",
                candidate.groups,
                candidate.margin
            );
            best = Some((candidate, score));
        }
    }

    match best {
        Some((solution, _)) => {
            debug!(
                "[GROUP] length {available_length}: {} groups of {} columns, margin {:.4}",
                solution.groups, solution.columns_per_group, solution.margin
            );
            Ok(solution)
        }
        None => Err(too_small),
    }
}
