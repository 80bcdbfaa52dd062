use std::str::FromStr;

use log::debug;

use crate::LayoutError;
use crate::entities::{GroupSpec, LayoutRequest, MarginBand, Pattern, SpacingPolicy};
use crate::geometry::{ShapeKind, ShapeSpec};
use crate::io::ext_repr::{ExtGroup, ExtLayoutRequest, ExtPattern, ExtShape, ExtSpacing};

/// Converts an [`ExtLayoutRequest`] into a validated [`LayoutRequest`].
pub fn import_request(ext_request: &ExtLayoutRequest) -> Result<LayoutRequest, LayoutError> {
    let pattern = import_pattern(&ext_request.pattern)?;
    let request = pattern.on_sheet(ext_request.sheet_width, ext_request.sheet_height);
    request.validate()?;
    debug!(
        "[IMPORT] request: {}x{} sheet, {} of {}",
        request.sheet_width, request.sheet_height, request.shape.kind, request.shape.primary_size
    );
    Ok(request)
}

pub fn import_pattern(ext_pattern: &ExtPattern) -> Result<Pattern, LayoutError> {
    Ok(Pattern {
        shape: import_shape(&ext_pattern.shape)?,
        spacing: import_spacing(&ext_pattern.spacing)?,
        stagger: ext_pattern.stagger,
        group: ext_pattern.group.as_ref().map(import_group).transpose()?,
    })
}

pub fn import_shape(ext_shape: &ExtShape) -> Result<ShapeSpec, LayoutError> {
    let kind = ShapeKind::from_str(&ext_shape.kind)?;
    ShapeSpec::try_new(kind, ext_shape.size, ext_shape.width)
}

pub fn import_spacing(ext_spacing: &ExtSpacing) -> Result<SpacingPolicy, LayoutError> {
    let band = match ext_spacing.max_margin {
        Some(max_margin) => MarginBand::try_new(ext_spacing.min_margin, max_margin),
        None => MarginBand::at_least(ext_spacing.min_margin),
    }?;
    SpacingPolicy::try_new(ext_spacing.min_gap, ext_spacing.max_gap, band)
}

pub fn import_group(ext_group: &ExtGroup) -> Result<GroupSpec, LayoutError> {
    GroupSpec::try_new(
        ext_group.min_columns_per_group,
        ext_group.max_columns_per_group,
        ext_group.inter_group_gap,
    )
}
