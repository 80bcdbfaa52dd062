use std::cmp::Ordering;

use crate::LayoutError;
use crate::util::FPA;

/// Acceptable range for the margin between the sheet edge and the tiled block.
/// `max` may be `f64::INFINITY`, in which case only the floor is enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginBand {
    pub min: f64,
    pub max: f64,
}

impl MarginBand {
    pub fn try_new(min: f64, max: f64) -> Result<Self, LayoutError> {
        let band = Self { min, max };
        band.validate()?;
        Ok(band)
    }

    /// Band collapsed to a single value: the margin is a target to stretch the pitch towards
    pub fn exact(margin: f64) -> Result<Self, LayoutError> {
        Self::try_new(margin, margin)
    }

    /// Band with only a floor
    pub fn at_least(min: f64) -> Result<Self, LayoutError> {
        Self::try_new(min, f64::INFINITY)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.min.is_finite() && self.min >= 0.0) {
            return Err(LayoutError::InvalidSpacingPolicy(format!(
                "minimum margin must be finite and non-negative, got {}",
                self.min
            )));
        }
        if self.max.is_nan() || self.max < self.min {
            return Err(LayoutError::InvalidSpacingPolicy(format!(
                "minimum margin {} exceeds maximum margin {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn is_collapsed(&self) -> bool {
        FPA(self.min) == FPA(self.max)
    }

    pub fn is_bounded(&self) -> bool {
        self.max.is_finite()
    }

    /// The margin the solvers aim for: the midpoint of a bounded band, the floor of an unbounded one.
    pub fn target(&self) -> f64 {
        match self.is_bounded() {
            true => (self.min + self.max) / 2.0,
            false => self.min,
        }
    }

    pub fn contains(&self, margin: f64) -> bool {
        FPA(margin) >= FPA(self.min) && FPA(margin) <= FPA(self.max)
    }

    /// Scores a margin that already satisfies the floor.
    pub fn score(&self, margin: f64) -> MarginScore {
        match self.contains(margin) {
            true => MarginScore {
                in_band: true,
                deviation: (margin - self.target()).abs(),
            },
            false => MarginScore {
                in_band: false,
                deviation: margin - self.max,
            },
        }
    }
}

/// How well a margin fits a [`MarginBand`].
/// In-band margins beat out-of-band ones. Within each class a smaller deviation is better:
/// the distance to the band's target when in band, the excess over the maximum otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginScore {
    pub in_band: bool,
    pub deviation: f64,
}

impl MarginScore {
    /// `Ordering::Less` means `self` is the better fit
    pub fn compare(&self, other: &MarginScore) -> Ordering {
        match (self.in_band, other.in_band) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => FPA(self.deviation)
                .partial_cmp(&FPA(other.deviation))
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Gap and margin preferences shared by both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacingPolicy {
    /// Smallest edge-to-edge distance between neighbouring shapes
    pub min_gap: f64,
    /// Largest edge-to-edge distance the solver may stretch to, `None` keeps the gap fixed at `min_gap`
    pub max_gap: Option<f64>,
    pub margin_band: MarginBand,
}

impl SpacingPolicy {
    pub fn try_new(
        min_gap: f64,
        max_gap: Option<f64>,
        margin_band: MarginBand,
    ) -> Result<Self, LayoutError> {
        let policy = Self {
            min_gap,
            max_gap,
            margin_band,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Fixed gap, margin stretched to hit `margin` exactly
    pub fn stretch_to_margin(gap: f64, margin: f64) -> Result<Self, LayoutError> {
        Self::try_new(gap, None, MarginBand::exact(margin)?)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.min_gap.is_finite() && self.min_gap >= 0.0) {
            return Err(LayoutError::InvalidSpacingPolicy(format!(
                "minimum gap must be finite and non-negative, got {}",
                self.min_gap
            )));
        }
        if let Some(max_gap) = self.max_gap {
            if !max_gap.is_finite() || FPA(max_gap) < FPA(self.min_gap) {
                return Err(LayoutError::InvalidSpacingPolicy(format!(
                    "minimum gap {} exceeds maximum gap {max_gap}",
                    self.min_gap
                )));
            }
        }
        self.margin_band.validate()
    }

    /// Smallest and largest pitch for shapes of `item_size` along an axis
    pub fn pitch_range(&self, item_size: f64) -> (f64, f64) {
        let min_gap = self.min_gap;
        let max_gap = self.max_gap.unwrap_or(min_gap).max(min_gap);
        (item_size + min_gap, item_size + max_gap)
    }

    /// A collapsed band without a gap ceiling is a margin target: the pitch may stretch freely to reach it.
    pub fn allows_stretch(&self) -> bool {
        self.max_gap.is_none() && self.margin_band.is_collapsed()
    }
}
