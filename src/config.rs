use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Visual style of the generated city.
///
/// The style selects the consolidation policy (`BlockCombine` enables
/// area-bounded growth, every other style uses distance-bounded
/// clustering) and the silhouette perturbation applied to merged hulls.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualStyle {
    /// Plain hulls, no perturbation.
    #[default]
    Standard,
    /// Sinusoidal offset applied to merged hull points.
    Wave,
    /// Radial cosine/sine offset applied to merged hull points.
    Radial,
    /// Area-bounded block growth instead of distance clustering.
    BlockCombine,
}

impl VisualStyle {
    /// Canonical name, as accepted by [`VisualStyle::from_str`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Wave => "wave",
            Self::Radial => "radial",
            Self::BlockCombine => "block-combine",
        }
    }
}

impl fmt::Display for VisualStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "wave" => Ok(Self::Wave),
            "radial" => Ok(Self::Radial),
            "block-combine" => Ok(Self::BlockCombine),
            other => Err(ConfigError::UnknownStyle(other.to_owned())),
        }
    }
}

/// Configuration bundle for a generation run.
///
/// All distances and areas are expressed in model units. Validation is
/// fatal: a bad bundle indicates a caller error, not a data defect.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active visual style; also selects the consolidation policy.
    pub style: VisualStyle,
    /// Maximum gap bridged when merging footprints.
    pub merge_distance: f64,
    /// Edge length above which the artistic hull injects detail points.
    pub cluster_size: f64,
    /// Detail intensity in `[0, 1]`; detail points are injected above 0.5.
    pub detail_level: f64,
    /// Amplitude of silhouette perturbations.
    pub height_variance: f64,
    /// Footprints at or above this area pass through block growth untouched.
    pub block_area_threshold: f64,
    /// Corridor radius applied to road center-lines.
    pub road_buffer: f64,
    /// Corridor radius applied to railway center-lines.
    pub rail_buffer: f64,
    /// Seed for the roof-selection random stream.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: VisualStyle::Standard,
            merge_distance: 2.0,
            cluster_size: 12.0,
            detail_level: 0.6,
            height_variance: 1.0,
            block_area_threshold: 200.0,
            road_buffer: 3.0,
            rail_buffer: 4.0,
            seed: 0,
        }
    }
}

impl Config {
    /// Checks every numeric field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("merge_distance", self.merge_distance)?;
        require_positive("cluster_size", self.cluster_size)?;
        require_positive("block_area_threshold", self.block_area_threshold)?;
        require_positive("road_buffer", self.road_buffer)?;
        require_positive("rail_buffer", self.rail_buffer)?;
        require_in_range("detail_level", self.detail_level, 0.0, 1.0)?;
        require_in_range("height_variance", self.height_variance, 0.0, f64::MAX)?;
        Ok(())
    }
}

fn require_positive(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange {
            parameter,
            value,
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
        })
    }
}

fn require_in_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}
