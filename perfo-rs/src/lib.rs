//! A layout engine for perforated panels.
//!
//! Given a rectangular sheet and a repeating cut-out shape, the engine derives how many
//! shapes fit on each axis, at which pitch, and with which (centered) margin.
//! The engine is pure: it performs no I/O and holds no state between requests.

/// Shapes and their bounding geometry
pub mod geometry;

/// Value objects describing requests and layouts
pub mod entities;

/// Axis, stagger and group solvers and the [`LayoutEngine`](solver::LayoutEngine) tying them together
pub mod solver;

/// Importing and exporting requests and layouts from and to an external representation
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::LayoutError;
#[doc(inline)]
pub use solver::{LayoutEngine, compute_layout};
