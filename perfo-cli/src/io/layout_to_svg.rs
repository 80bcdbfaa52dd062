use svg::Document;
use svg::node::element::{Definitions, Group, Text, Title, Use};

use perfo_rs::entities::LayoutResult;

use crate::io::svg_util;
use crate::io::svg_util::{ShapeOutline, SvgDrawOptions};

/// Draws the sheet outline and every shape of `layout`.
pub fn layout_to_svg(layout: &LayoutResult, options: SvgDrawOptions, title: &str) -> Document {
    let theme = &options.theme;
    let stroke_width = stroke_width(layout.sheet_width, layout.sheet_height, options);

    let pattern_group = {
        let hole_style = [
            ("fill", &*format!("{}", theme.hole_fill)),
            (
                "stroke",
                &*format!("{}", svg_util::change_brightness(theme.sheet_fill, 0.5)),
            ),
            ("stroke-width", &*format!("{}", stroke_width)),
        ];
        let hole = match svg_util::shape_outline(&layout.shape) {
            ShapeOutline::Path(data) => Group::new()
                .set("id", "hole")
                .add(svg_util::data_to_path(data, &hole_style)),
            ShapeOutline::Circle { radius } => Group::new()
                .set("id", "hole")
                .add(svg_util::circle(radius, &hole_style)),
        };

        //a single definition, instanced for every cell
        let mut pattern_group = Group::new()
            .set("id", "PATTERN")
            .add(Definitions::new().add(hole));
        for cell in layout.cells() {
            let (cx, cy) = cell.center;
            let cell_ref = Use::new()
                .set("transform", format!("translate({cx} {cy})"))
                .set("xlink:href", "#hole")
                .add(Title::new(format!(
                    "{}, row: {}, column: {}, center: ({cx:.3}, {cy:.3})",
                    layout.shape.kind, cell.row, cell.column
                )));
            pattern_group = pattern_group.add(cell_ref);
        }
        pattern_group
    };

    let margin_group = match options.margin_box {
        false => None,
        true => {
            let (x_min, y_min) = (layout.x.margin as f32, layout.y.margin as f32);
            let width = layout.occupied_width() as f32;
            let height = layout.occupied_height() as f32;
            let dash = format!("{} {}", 4.0 * stroke_width, 2.0 * stroke_width);
            Some(
                Group::new().set("id", "margins").add(svg_util::data_to_path(
                    svg_util::rect_data(x_min, y_min, width, height),
                    &[
                        ("fill", "none"),
                        ("stroke", &*format!("{}", theme.margin_stroke)),
                        ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                        ("stroke-dasharray", &*dash),
                    ],
                )),
            )
        }
    };

    let label = format!(
        "{} x {} | {} {} x {} | margins: ({:.3}, {:.3}) | {} shapes | {}",
        layout.sheet_width,
        layout.sheet_height,
        layout.shape.kind,
        layout.count_x(),
        layout.count_y(),
        layout.x.margin,
        layout.y.margin,
        layout.n_shapes(),
        title
    );

    let groups = [Some(pattern_group), margin_group].into_iter().flatten();
    sheet_document(
        layout.sheet_width,
        layout.sheet_height,
        options,
        &label,
        groups,
    )
}

/// Draws an unperforated sheet, for jobs where not a single shape fits.
pub fn outline_to_svg(
    sheet_width: f64,
    sheet_height: f64,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let label = format!("{sheet_width} x {sheet_height} | no perforation | {title}");
    sheet_document(sheet_width, sheet_height, options, &label, [])
}

fn stroke_width(sheet_width: f64, sheet_height: f64, options: SvgDrawOptions) -> f32 {
    f64::min(sheet_width, sheet_height) as f32 * 0.001 * options.theme.stroke_width_multiplier
}

fn sheet_document(
    sheet_width: f64,
    sheet_height: f64,
    options: SvgDrawOptions,
    label: &str,
    groups: impl IntoIterator<Item = Group>,
) -> Document {
    let theme = &options.theme;
    let (width, height) = (sheet_width as f32, sheet_height as f32);
    let stroke_width = stroke_width(sheet_width, sheet_height, options);
    let font_size = f32::min(width, height) * 0.025;

    let outline_group = Group::new()
        .set("id", "OUTLINE")
        .add(svg_util::data_to_path(
            svg_util::rect_data(0.0, 0.0, width, height),
            &[
                ("fill", &*format!("{}", theme.sheet_fill)),
                ("stroke", &*format!("{}", theme.outline_stroke)),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!("sheet, {sheet_width} x {sheet_height}")));

    //5% of room around the sheet, more above it for the label
    let pad = 0.05 * f32::max(width, height);
    let vbox = (
        -pad,
        -pad - 2.0 * font_size,
        width + 2.0 * pad,
        height + 2.0 * pad + 2.0 * font_size,
    );

    let mut document = Document::new()
        .set("viewBox", vbox)
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .add(outline_group);
    for group in groups {
        document = document.add(group);
    }
    match options.label {
        true => document.add(
            Text::new(label)
                .set("x", 0.0_f32)
                .set("y", -0.5 * font_size)
                .set("font-size", font_size)
                .set("font-family", "monospace")
                .set("font-weight", "500"),
        ),
        false => document,
    }
}
