//! Feature Scaling
//!
//! Two-stage transform applied to every model input, always in this order:
//! 1. Min-max rescale into `feature_range`
//! 2. Standardize to zero mean / unit variance
//!
//! Zero-width ranges and zero scales are treated as 1.0, matching how the
//! scalers were fitted.

use serde::Deserialize;
use std::path::Path;

use crate::error::ArtifactLoadError;
use crate::features::N_FEATURES;

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

#[inline]
fn nonzero(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: Vec<f64>,
    pub data_range: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
}

impl MinMaxScaler {
    pub fn transform(&self, x: &[f64; N_FEATURES]) -> [f64; N_FEATURES] {
        let (lo, hi) = self.feature_range;
        let mut out = [0.0; N_FEATURES];
        for i in 0..N_FEATURES {
            let unit = (x[i] - self.data_min[i]) / nonzero(self.data_range[i]);
            out[i] = unit * (hi - lo) + lo;
        }
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, x: &[f64; N_FEATURES]) -> [f64; N_FEATURES] {
        let mut out = [0.0; N_FEATURES];
        for i in 0..N_FEATURES {
            out[i] = (x[i] - self.mean[i]) / nonzero(self.scale[i]);
        }
        out
    }
}

/// Min-max step followed by standardization
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerPipeline {
    pub minmax: MinMaxScaler,
    pub standard: StandardScaler,
}

impl ScalerPipeline {
    pub fn transform(&self, x: &[f64; N_FEATURES]) -> [f64; N_FEATURES] {
        self.standard.transform(&self.minmax.transform(x))
    }

    /// Reject parameter vectors that do not cover all seven features
    pub fn validate(&self, path: &Path) -> Result<(), ArtifactLoadError> {
        let lengths = [
            ("minmax.data_min", self.minmax.data_min.len()),
            ("minmax.data_range", self.minmax.data_range.len()),
            ("standard.mean", self.standard.mean.len()),
            ("standard.scale", self.standard.scale.len()),
        ];
        for (name, len) in lengths {
            if len != N_FEATURES {
                return Err(ArtifactLoadError::shape(
                    path,
                    format!("{} has {} values, expected {}", name, len, N_FEATURES),
                ));
            }
        }
        Ok(())
    }
}
