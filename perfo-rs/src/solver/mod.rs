mod axis;
mod engine;
mod group;
mod stagger;

#[doc(inline)]
pub use axis::{
    AxisSolution, SolverFailure, StaggerRoom, solve_axis, solve_axis_fixed_margin, solve_staggered_axis,
};
#[doc(inline)]
pub use engine::{LayoutEngine, compute_layout};
#[doc(inline)]
pub use group::{GroupSolution, solve_grouped_axis};
#[doc(inline)]
pub use stagger::{StaggerMode, StaggerPolicy, StaggerRules, row_count, row_offset};

/// Upper bound on the number of shapes along an axis, used to cap every search loop
fn iteration_cap(available_length: f64, min_pitch: f64) -> usize {
    debug_assert!(min_pitch > 0.0, "pitch must be positive: {min_pitch}");
    (available_length / min_pitch).floor() as usize + 1
}
