use crate::LayoutError;
use crate::entities::{GroupSpec, SpacingPolicy};
use crate::geometry::ShapeSpec;
use crate::solver::StaggerMode;

/// Everything about a layout request except the sheet: what is cut and how it is spaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pattern {
    pub shape: ShapeSpec,
    pub spacing: SpacingPolicy,
    pub stagger: StaggerMode,
    pub group: Option<GroupSpec>,
}

impl Pattern {
    /// Applies the pattern to a sheet of `sheet_width` by `sheet_height`
    pub fn on_sheet(&self, sheet_width: f64, sheet_height: f64) -> LayoutRequest {
        LayoutRequest::new(
            sheet_width,
            sheet_height,
            self.shape,
            self.spacing,
            self.stagger,
            self.group,
        )
    }
}

/// Fully resolved input of a single layout computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRequest {
    pub sheet_width: f64,
    pub sheet_height: f64,
    pub shape: ShapeSpec,
    pub spacing: SpacingPolicy,
    pub stagger: StaggerMode,
    pub group: Option<GroupSpec>,
}

impl LayoutRequest {
    pub fn new(
        sheet_width: f64,
        sheet_height: f64,
        shape: ShapeSpec,
        spacing: SpacingPolicy,
        stagger: StaggerMode,
        group: Option<GroupSpec>,
    ) -> Self {
        Self {
            sheet_width,
            sheet_height,
            shape,
            spacing,
            stagger,
            group,
        }
    }

    /// Checks every part of the request, all fields being public.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [("width", self.sheet_width), ("height", self.sheet_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidSheet(format!(
                    "sheet {name} must be positive, got {value}"
                )));
            }
        }
        ShapeSpec::try_new(
            self.shape.kind,
            self.shape.primary_size,
            Some(self.shape.secondary_size),
        )?;
        self.spacing.validate()?;
        if let Some(group) = &self.group {
            group.validate()?;
        }
        Ok(())
    }
}
