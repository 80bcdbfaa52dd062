/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

mod config;
mod fpa;

#[doc(inline)]
pub use config::GroupSearch;
#[doc(inline)]
pub use config::MarginMode;
#[doc(inline)]
pub use config::SolverConfig;
#[doc(inline)]
pub use fpa::FPA;
