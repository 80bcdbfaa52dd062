pub mod geo_enums;
pub mod shape;

#[doc(inline)]
pub use geo_enums::{Axis, ShapeKind};
#[doc(inline)]
pub use shape::{BoundingBox, ShapeSpec, bounding_box};
