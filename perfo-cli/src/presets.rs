use std::collections::BTreeMap;

use anyhow::{Result, bail};
use itertools::Itertools;
use log::{debug, warn};

use perfo_rs::io::ext_repr::{ExtGroup, ExtPattern, ExtShape, ExtSpacing};
use perfo_rs::solver::StaggerMode;

pub const DEFAULT_PRESET: &str = "Squares 10x10mm";

/// Spacing between shapes of the built-in presets
const PRESET_GAP: f64 = 10.0;
/// Margin the built-in presets stretch their pitch towards
const PRESET_MARGIN: f64 = 17.0;

/// Named perforation patterns a job can refer to.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: BTreeMap<String, ExtPattern>,
}

impl PresetRegistry {
    /// The patterns available out of the box
    pub fn builtin() -> Self {
        let stretched = ExtSpacing {
            min_gap: PRESET_GAP,
            max_gap: None,
            min_margin: PRESET_MARGIN,
            max_margin: Some(PRESET_MARGIN),
        };
        let staggered = |kind: &str, size: f64, width: Option<f64>| ExtPattern {
            shape: ExtShape {
                kind: kind.to_string(),
                size,
                width,
            },
            spacing: stretched,
            stagger: StaggerMode::Half,
            group: None,
        };

        let presets = [
            (DEFAULT_PRESET, staggered("square", 10.0, None)),
            //10 mm from tip to tip
            (
                "Check 10x10mm",
                staggered("diamond", 10.0 / std::f64::consts::SQRT_2, None),
            ),
            (
                "Slotted hole 35x10mm",
                staggered("slot", 35.0, Some(10.0)),
            ),
            ("Round hole 10mm", staggered("circle", 10.0, None)),
            (
                "Relief slot 40x8.5mm",
                ExtPattern {
                    shape: ExtShape {
                        kind: "slot".to_string(),
                        size: 40.0,
                        width: Some(8.5),
                    },
                    spacing: ExtSpacing {
                        min_gap: 8.5,
                        max_gap: Some(13.0),
                        min_margin: 18.0,
                        max_margin: Some(27.0),
                    },
                    stagger: StaggerMode::None,
                    group: Some(ExtGroup {
                        min_columns_per_group: 4,
                        max_columns_per_group: None,
                        inter_group_gap: 30.0,
                    }),
                },
            ),
        ];

        Self {
            presets: presets
                .into_iter()
                .map(|(name, pattern)| (name.to_string(), pattern))
                .collect(),
        }
    }

    /// Adds `presets` to the registry, replacing built-in patterns with the same name.
    pub fn extend(&mut self, presets: BTreeMap<String, ExtPattern>) {
        for (name, pattern) in presets {
            match self.presets.contains_key(&name) {
                true => warn!("[PRESETS] preset {name:?} overridden"),
                false => debug!("[PRESETS] preset {name:?} added"),
            }
            self.presets.insert(name, pattern);
        }
    }

    pub fn get(&self, name: &str) -> Result<&ExtPattern> {
        match self.presets.get(name) {
            Some(pattern) => Ok(pattern),
            None => bail!(
                "unknown preset {name:?}, available: {}",
                self.names().map(|n| format!("{n:?}")).join(", ")
            ),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
