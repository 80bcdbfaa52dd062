mod group;
mod layout;
mod request;
mod spacing;

#[doc(inline)]
pub use group::GroupSpec;
#[doc(inline)]
pub use layout::{Cell, LayoutResult};
#[doc(inline)]
pub use request::{LayoutRequest, Pattern};
#[doc(inline)]
pub use spacing::{MarginBand, MarginScore, SpacingPolicy};
