use serde::{Deserialize, Serialize};

use perfo_rs::util::SolverConfig;

use crate::io::svg_util::SvgDrawOptions;

/// Configuration of the command line front-end
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PerfoConfig {
    /// Configuration of the layout engine
    #[serde(default)]
    pub solver: SolverConfig,
    /// List the center of every shape in the output JSON
    #[serde(default)]
    pub export_centers: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for PerfoConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            export_centers: false,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
