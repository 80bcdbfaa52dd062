use log::{debug, info};

use crate::LayoutError;
use crate::entities::{GroupSpec, LayoutRequest, LayoutResult, SpacingPolicy};
use crate::geometry::{Axis, BoundingBox, ShapeSpec};
use crate::solver::{
    AxisSolution, GroupSolution, StaggerMode, StaggerPolicy, StaggerRoom, solve_axis,
    solve_axis_fixed_margin, solve_grouped_axis, solve_staggered_axis,
};
use crate::util::{FPA, MarginMode, SolverConfig, assertions};

/// Entry point of the library: turns a [`LayoutRequest`] into a [`LayoutResult`].
///
/// The engine is stateless apart from its configuration and can be shared between threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutEngine {
    config: SolverConfig,
}

impl LayoutEngine {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn compute(&self, request: &LayoutRequest) -> Result<LayoutResult, LayoutError> {
        request.validate()?;

        let bbox = request.shape.bbox();
        let stagger_policy = self.config.stagger_rules.policy_for(request.shape.kind);
        let spacing = &request.spacing;

        let y = solve_axis(request.sheet_height, bbox.height, spacing, 0.0, &self.config)
            .map_err(|f| f.on_axis(Axis::Y))?;
        let (x, groups) = match &request.group {
            Some(group_spec) => {
                let groups = self.solve_grouped_x(request, bbox, group_spec)?;
                (groups.axis_solution(), Some(groups))
            }
            None => (self.solve_x(request, bbox, stagger_policy, y.count)?, None),
        };

        let (x, y) = match self.config.margin_mode {
            MarginMode::Independent => (x, y),
            MarginMode::Equal => self.equalize_margins(request, bbox, x, y, groups.is_some())?,
        };

        check_shifted_rows(request.stagger, stagger_policy, &x)?;

        let layout = LayoutResult {
            sheet_width: request.sheet_width,
            sheet_height: request.sheet_height,
            shape: request.shape,
            bbox,
            x,
            y,
            groups,
            stagger: request.stagger,
            stagger_policy,
        };

        debug_assert!(assertions::layout_is_centered(&layout));
        debug_assert!(assertions::cells_are_centered(&layout));
        debug_assert!(assertions::cells_within_sheet(&layout));

        info!(
            "[ENGINE] {}x{} sheet, {} {}: {} x {} grid, pitch ({:.3}, {:.3}), margin ({:.3}, {:.3}), {} shapes",
            request.sheet_width,
            request.sheet_height,
            request.shape.kind,
            request.shape.primary_size,
            layout.x.count,
            layout.y.count,
            layout.x.pitch,
            layout.y.pitch,
            layout.x.margin,
            layout.y.margin,
            layout.n_shapes()
        );

        Ok(layout)
    }

    fn solve_grouped_x(
        &self,
        request: &LayoutRequest,
        bbox: BoundingBox,
        group_spec: &GroupSpec,
    ) -> Result<GroupSolution, LayoutError> {
        solve_grouped_axis(
            request.sheet_width,
            bbox.width,
            request.spacing.min_gap,
            group_spec,
            request.spacing.margin_band,
            &self.config,
        )
        .map_err(|f| f.on_axis(Axis::X))
    }

    /// Solves X, reserving half a pitch for the row shift when the stagger policy asks for it
    /// or when shifted rows would otherwise leave the sheet.
    ///
    /// Nothing is reserved when shifted rows drop their last column: they stay inside the unshifted block.
    fn solve_x(
        &self,
        request: &LayoutRequest,
        bbox: BoundingBox,
        policy: StaggerPolicy,
        n_rows: usize,
    ) -> Result<AxisSolution, LayoutError> {
        let unshifted = solve_axis(
            request.sheet_width,
            bbox.width,
            &request.spacing,
            0.0,
            &self.config,
        )
        .map_err(|f| f.on_axis(Axis::X))?;
        if request.stagger == StaggerMode::None || n_rows < 2 || policy.drop_last_column {
            return Ok(unshifted);
        }

        let overflows = FPA(unshifted.pitch / 2.0) > FPA(unshifted.margin);
        if !(policy.reserves_offset() || overflows) {
            return Ok(unshifted);
        }

        let shifted = solve_staggered_axis(
            request.sheet_width,
            bbox.width,
            &request.spacing,
            &self.config,
        )
        .map_err(|f| f.on_axis(Axis::X))?;
        debug!(
            "[ENGINE] reserved {:.4} for staggered rows: pitch {:.4} -> {:.4}, count {} -> {}",
            shifted.stagger_extra, unshifted.pitch, shifted.pitch, unshifted.count, shifted.count
        );
        Ok(shifted)
    }

    /// Re-solves both axes with the margin fixed to the larger of the two.
    /// A banded X axis cannot be re-solved, it only succeeds when it already holds the larger margin.
    /// A reservation for staggered rows is kept, recomputed from the new pitch.
    fn equalize_margins(
        &self,
        request: &LayoutRequest,
        bbox: BoundingBox,
        x: AxisSolution,
        y: AxisSolution,
        grouped: bool,
    ) -> Result<(AxisSolution, AxisSolution), LayoutError> {
        let common = f64::max(x.margin, y.margin);
        debug!(
            "[ENGINE] equalizing margins ({:.4}, {:.4}) to {common:.4}",
            x.margin, y.margin
        );

        let y = fixed_margin(
            request.sheet_height,
            bbox.height,
            &request.spacing,
            common,
            StaggerRoom::NONE,
            Axis::Y,
        )?;
        let x = match grouped {
            true if FPA(x.margin) == FPA(common) => x,
            true => {
                return Err(LayoutError::MarginUnreachable {
                    axis: Axis::X,
                    margin: common,
                });
            }
            false => {
                //the engine only ever reserves half a pitch, and only with at least one shifted row
                let room = match x.stagger_extra > 0.0 && y.count > 1 {
                    true => StaggerRoom::HalfPitch,
                    false => StaggerRoom::NONE,
                };
                fixed_margin(
                    request.sheet_width,
                    bbox.width,
                    &request.spacing,
                    common,
                    room,
                    Axis::X,
                )?
            }
        };
        Ok((x, y))
    }
}

fn fixed_margin(
    available_length: f64,
    item_size: f64,
    spacing: &SpacingPolicy,
    margin: f64,
    room: StaggerRoom,
    axis: Axis,
) -> Result<AxisSolution, LayoutError> {
    solve_axis_fixed_margin(available_length, item_size, spacing, margin, room)
        .map_err(|f| f.on_axis(axis))
}

/// Rows shifted by half a pitch without dropping a column must still end on the sheet.
fn check_shifted_rows(
    stagger: StaggerMode,
    policy: StaggerPolicy,
    x: &AxisSolution,
) -> Result<(), LayoutError> {
    if stagger == StaggerMode::None || policy.drop_last_column || x.count == 0 {
        return Ok(());
    }
    let room = x.margin + x.stagger_extra;
    match FPA(x.pitch / 2.0) > FPA(room) {
        true => Err(LayoutError::MarginUnreachable {
            axis: Axis::X,
            margin: x.margin,
        }),
        false => Ok(()),
    }
}

/// Computes a layout with the default [`SolverConfig`].
pub fn compute_layout(
    sheet_width: f64,
    sheet_height: f64,
    shape: ShapeSpec,
    spacing: SpacingPolicy,
    stagger: StaggerMode,
    group: Option<GroupSpec>,
) -> Result<LayoutResult, LayoutError> {
    let request = LayoutRequest::new(sheet_width, sheet_height, shape, spacing, stagger, group);
    LayoutEngine::default().compute(&request)
}
