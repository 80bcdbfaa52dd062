use std::f64::consts::SQRT_2;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path};

use perfo_rs::geometry::{ShapeKind, ShapeSpec};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Draw a dashed box around the area left after removing the margins
    #[serde(default = "default_true")]
    pub margin_box: bool,
    ///Print the sheet size and pattern statistics above the sheet
    #[serde(default = "default_true")]
    pub label: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            margin_box: true,
            label: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f32,
    pub sheet_fill: Color,
    pub hole_fill: Color,
    pub outline_stroke: Color,
    pub margin_stroke: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::STEEL
    }
}

impl SvgLayoutTheme {
    pub const STEEL: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        sheet_fill: Color(0xB8, 0xC2, 0xCC),
        hole_fill: Color(0xFF, 0xFF, 0xFF),
        outline_stroke: Color(0x00, 0x00, 0x00),
        margin_stroke: Color(0xD0, 0x00, 0x00),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        sheet_fill: Color(0xD3, 0xD3, 0xD3),
        hole_fill: Color(0x7A, 0x7A, 0x7A),
        outline_stroke: Color(0x63, 0x63, 0x63),
        margin_stroke: Color(0x63, 0x63, 0x63),
    };
}

pub fn change_brightness(color: Color, fraction: f32) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f32 * fraction) as u8;
    let g = (g as f32 * fraction) as u8;
    let b = (b as f32 * fraction) as u8;
    Color(r, g, b)
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| format!("invalid color: {s:?}, expected #RRGGBB"))
        };
        match hex.len() {
            6 => Ok(Color(channel(0)?, channel(2)?, channel(4)?)),
            _ => Err(format!("invalid color: {s:?}, expected #RRGGBB")),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Outline of a single shape, centered on the origin
pub enum ShapeOutline {
    Path(Data),
    Circle { radius: f32 },
}

pub fn shape_outline(shape: &ShapeSpec) -> ShapeOutline {
    let s = shape.primary_size as f32;
    match shape.kind {
        ShapeKind::Square => ShapeOutline::Path(rect_data(-s / 2.0, -s / 2.0, s, s)),
        ShapeKind::Diamond => {
            let h = (shape.primary_size * SQRT_2 / 2.0) as f32;
            ShapeOutline::Path(
                Data::new()
                    .move_to((0.0, -h))
                    .line_to((h, 0.0))
                    .line_to((0.0, h))
                    .line_to((-h, 0.0))
                    .close(),
            )
        }
        ShapeKind::Circle => ShapeOutline::Circle { radius: s / 2.0 },
        ShapeKind::Slot => ShapeOutline::Path(stadium_data(s, shape.secondary_size as f32)),
    }
}

/// Two straight edges joined by half circles, long axis along X
pub fn stadium_data(length: f32, width: f32) -> Data {
    let r = width / 2.0;
    let h = (length - width) / 2.0;
    Data::new()
        .move_to((-h, -r))
        .line_to((h, -r))
        .elliptical_arc_to(vec![r, r, 0.0, 0.0, 1.0, h, r])
        .line_to((-h, r))
        .elliptical_arc_to(vec![r, r, 0.0, 0.0, 1.0, -h, -r])
        .close()
}

pub fn rect_data(x_min: f32, y_min: f32, width: f32, height: f32) -> Data {
    Data::new()
        .move_to((x_min, y_min))
        .line_to((x_min + width, y_min))
        .line_to((x_min + width, y_min + height))
        .line_to((x_min, y_min + height))
        .close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn circle(radius: f32, params: &[(&str, &str)]) -> Circle {
    let mut circle = Circle::new()
        .set("cx", 0.0_f32)
        .set("cy", 0.0_f32)
        .set("r", radius);
    for param in params {
        circle = circle.set(param.0, param.1)
    }
    circle
}
