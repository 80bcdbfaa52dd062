use crate::LayoutError;

/// Banded layout along X: columns are tiled in groups of `columns_per_group` shapes at the regular pitch,
/// with `inter_group_gap` of un-perforated material between consecutive groups.
///
/// The column count per group is searched in `[min_columns_per_group, max_columns_per_group]`.
/// Equal bounds pin it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSpec {
    pub min_columns_per_group: usize,
    pub max_columns_per_group: Option<usize>,
    /// Edge-to-edge distance between the last shape of a group and the first shape of the next
    pub inter_group_gap: f64,
}

impl GroupSpec {
    pub fn try_new(
        min_columns_per_group: usize,
        max_columns_per_group: Option<usize>,
        inter_group_gap: f64,
    ) -> Result<Self, LayoutError> {
        let spec = Self {
            min_columns_per_group,
            max_columns_per_group,
            inter_group_gap,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Groups of exactly `columns_per_group` columns
    pub fn fixed(columns_per_group: usize, inter_group_gap: f64) -> Result<Self, LayoutError> {
        Self::try_new(columns_per_group, Some(columns_per_group), inter_group_gap)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.min_columns_per_group == 0 {
            return Err(LayoutError::InvalidGroupSpec(
                "groups need at least one column".to_string(),
            ));
        }
        if let Some(max) = self.max_columns_per_group {
            if max < self.min_columns_per_group {
                return Err(LayoutError::InvalidGroupSpec(format!(
                    "minimum columns per group {} exceeds maximum {max}",
                    self.min_columns_per_group
                )));
            }
        }
        if !(self.inter_group_gap.is_finite() && self.inter_group_gap >= 0.0) {
            return Err(LayoutError::InvalidGroupSpec(format!(
                "inter group gap must be finite and non-negative, got {}",
                self.inter_group_gap
            )));
        }
        Ok(())
    }
}
