use serde::{Deserialize, Serialize};

use crate::solver::StaggerRules;

///Configuration of the [`LayoutEngine`](crate::solver::LayoutEngine)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    ///Increment (in sheet units) between consecutive gaps tested when sweeping `[min_gap, max_gap]`
    pub gap_step: f64,
    ///Upper limit on the number of pitches tested per axis. The gap step is widened when exceeded.
    pub max_pitch_candidates: usize,
    ///How the column count per group is searched in banded layouts
    #[serde(default)]
    pub group_search: GroupSearch,
    ///Whether both axes are centered independently or forced to share one margin
    #[serde(default)]
    pub margin_mode: MarginMode,
    ///Per shape family stagger behaviour
    #[serde(default)]
    pub stagger_rules: StaggerRules,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gap_step: 0.1,
            max_pitch_candidates: 1000,
            group_search: GroupSearch::default(),
            margin_mode: MarginMode::default(),
            stagger_rules: StaggerRules::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupSearch {
    ///Every column count between the minimum and the largest one that fits is evaluated
    #[default]
    Exhaustive,
    ///The search stops at the first column count whose margin drops below the floor.
    ///Only sound when the margin is monotone in the column count for the given gap and item size.
    EarlyExit,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarginMode {
    ///Each axis is centered on its own, margins may differ between the axes
    #[default]
    Independent,
    ///Both axes are re-solved to share `max(margin_x, margin_y)`
    Equal,
}
