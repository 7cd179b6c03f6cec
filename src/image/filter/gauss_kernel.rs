extern crate nalgebra as na;

use na::DMatrix;
use crate::{Float,float};
use crate::error::{Result, SiftError};
use float::consts::PI;
use super::kernel::Kernel;

/// Kernel radius in multiples of sigma.
pub const RADIUS_FACTOR: Float = 3.0;
/// Largest accepted kernel radius in taps.
pub const MAX_RADIUS: usize = 1 << 16;

/// Normalised 1D Gaussian of radius `ceil(3 sigma)`.
#[derive(Debug,Clone)]
pub struct GaussKernel1D {
    kernel: DMatrix<Float>,
    sigma: Float
}

impl GaussKernel1D {
    fn sample(mean: Float, std: Float, x: Float) -> Float {
        let exponent = (-0.5*((x-mean)/std).powi(2)).exp();
        let factor = 1.0/(std*(2.0*PI).sqrt());
        factor*exponent
    }

    /// Sigma must be finite, positive and small enough for a kernel of at
    /// most `MAX_RADIUS` taps on each side.
    pub fn validate_sigma(sigma: Float) -> Result<()> {
        match sigma.is_finite() && sigma > 0.0 && RADIUS_FACTOR*sigma <= MAX_RADIUS as Float {
            true => Ok(()),
            false => Err(SiftError::InvalidSigma(sigma))
        }
    }

    pub fn new(sigma: Float) -> Result<GaussKernel1D> {
        GaussKernel1D::validate_sigma(sigma)?;

        let radius = GaussKernel1D::generate_blur_radius(sigma);
        let start = -(radius as isize);
        let end_exclusive = (radius as isize) + 1;
        let samples: Vec<Float> = (start..end_exclusive).map(|x| GaussKernel1D::sample(0.0, sigma, x as Float)).collect();
        let total: Float = samples.iter().sum();

        Ok(GaussKernel1D {
            kernel: DMatrix::from_vec(1, 2*radius+1, samples.into_iter().map(|w| w/total).collect()),
            sigma
        })
    }

    pub fn generate_blur_radius(sigma: Float) -> usize {
        (RADIUS_FACTOR*sigma).ceil() as usize
    }

    pub fn sigma(&self) -> Float {
        self.sigma
    }

    pub fn weight_sum(&self) -> Float {
        self.kernel.sum()
    }
}

impl Kernel for GaussKernel1D {
    fn kernel(&self) -> &DMatrix<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        1
    }

    fn normalizing_constant(&self) -> Float{
        1.0
    }
}
