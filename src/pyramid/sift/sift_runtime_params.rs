use std::{fs, path::Path};
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::error::{Result, SiftError};
use crate::image::filter::gauss_kernel::GaussKernel1D;
use crate::features::hessian_response::DEFAULT_EDGE_R;
use crate::pyramid::sift::sift_octave::{SCALE_LEVEL_COUNT, LEVELS_PER_DOUBLING, DEFAULT_HANDOFF_LEVEL};

/// Detector configuration. Every field is optional in YAML and falls back to
/// its default.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SiftRuntimeParams {
    /// Blur of the first scale level of every octave.
    pub sigma: Float,
    /// Maximum ratio of principal curvatures kept by edge rejection.
    pub edge_r: Float,
    pub octave_count: usize,
    /// Index of the blur level that is downsampled into the next octave.
    pub handoff_level: usize
}

impl Default for SiftRuntimeParams {
    fn default() -> Self {
        SiftRuntimeParams {
            sigma: 1.0,
            edge_r: DEFAULT_EDGE_R,
            octave_count: 3,
            handoff_level: DEFAULT_HANDOFF_LEVEL
        }
    }
}

impl SiftRuntimeParams {

    pub fn new(sigma: Float, edge_r: Float, octave_count: usize) -> SiftRuntimeParams {
        SiftRuntimeParams { sigma, edge_r, octave_count, ..Default::default() }
    }

    pub fn validate(&self) -> Result<()> {
        GaussKernel1D::validate_sigma(self.sigma)?;
        // the most blurred level of an octave needs the widest kernel
        let largest_level_sigma = self.sigma*((SCALE_LEVEL_COUNT - 1) as Float/LEVELS_PER_DOUBLING as Float).exp2();
        if GaussKernel1D::validate_sigma(largest_level_sigma).is_err() {
            return Err(SiftError::InvalidSigma(self.sigma));
        }
        if !(self.edge_r.is_finite() && self.edge_r > 0.0) {
            return Err(SiftError::ThresholdOutOfRange(self.edge_r));
        }
        if self.handoff_level >= SCALE_LEVEL_COUNT {
            return Err(SiftError::HandoffLevelOutOfRange { level: self.handoff_level, levels: SCALE_LEVEL_COUNT });
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<SiftRuntimeParams> {
        let params: SiftRuntimeParams = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SiftRuntimeParams> {
        let yaml = fs::read_to_string(path)?;
        SiftRuntimeParams::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
