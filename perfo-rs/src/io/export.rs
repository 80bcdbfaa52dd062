use itertools::Itertools;

use crate::entities::{GroupSpec, LayoutRequest, LayoutResult, Pattern, SpacingPolicy};
use crate::geometry::ShapeSpec;
use crate::io::ext_repr::{
    ExtGroup, ExtGroupLayout, ExtLayout, ExtLayoutRequest, ExtPattern, ExtShape, ExtSpacing,
};

/// Exports a [`LayoutResult`] by composing an [`ExtLayout`] from it.
/// The centers of all shapes are only listed when `with_centers` is set.
pub fn export_layout(layout: &LayoutResult, with_centers: bool) -> ExtLayout {
    let centers = match with_centers {
        true => layout.cells().map(|c| c.center).collect_vec(),
        false => vec![],
    };
    ExtLayout {
        count_x: layout.count_x(),
        count_y: layout.count_y(),
        pitch_x: layout.x.pitch,
        pitch_y: layout.y.pitch,
        margin_x: layout.x.margin,
        margin_y: layout.y.margin,
        stagger_extra_x: layout.x.stagger_extra,
        stagger: layout.stagger,
        odd_row_offset: layout.row_offset(1),
        even_row_count: layout.row_count(0),
        odd_row_count: layout.row_count(1),
        n_shapes: layout.n_shapes(),
        groups: layout.groups.map(|g| ExtGroupLayout {
            columns_per_group: g.columns_per_group,
            groups: g.groups,
            group_width: g.group_width,
            inter_group_gap: g.inter_group_gap,
        }),
        centers,
    }
}

pub fn export_request(request: &LayoutRequest) -> ExtLayoutRequest {
    ExtLayoutRequest {
        sheet_width: request.sheet_width,
        sheet_height: request.sheet_height,
        pattern: export_pattern(&Pattern {
            shape: request.shape,
            spacing: request.spacing,
            stagger: request.stagger,
            group: request.group,
        }),
    }
}

pub fn export_pattern(pattern: &Pattern) -> ExtPattern {
    ExtPattern {
        shape: export_shape(&pattern.shape),
        spacing: export_spacing(&pattern.spacing),
        stagger: pattern.stagger,
        group: pattern.group.as_ref().map(export_group),
    }
}

pub fn export_shape(shape: &ShapeSpec) -> ExtShape {
    ExtShape {
        kind: shape.kind.name().to_string(),
        size: shape.primary_size,
        width: shape.straight_length().map(|_| shape.secondary_size),
    }
}

pub fn export_spacing(spacing: &SpacingPolicy) -> ExtSpacing {
    let band = &spacing.margin_band;
    ExtSpacing {
        min_gap: spacing.min_gap,
        max_gap: spacing.max_gap,
        min_margin: band.min,
        max_margin: band.is_bounded().then_some(band.max),
    }
}

pub fn export_group(group: &GroupSpec) -> ExtGroup {
    ExtGroup {
        min_columns_per_group: group.min_columns_per_group,
        max_columns_per_group: group.max_columns_per_group,
        inter_group_gap: group.inter_group_gap,
    }
}
