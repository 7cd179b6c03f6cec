extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::error::Result;
use crate::image::{Image, image_encoding::ImageEncoding, par_matrix_from_fn};
use crate::image::filter::{filter_1d_convolution, FilterDirection, central_difference_kernel::CentralDifferenceKernel};

pub const MAGNITUDE_CHANNEL: usize = 0;
pub const ORIENTATION_CHANNEL: usize = 1;

/// Gradient magnitude and orientation of a single-channel image.
///
/// Gradients are central differences, `Gx = (I(x+1,y) - I(x-1,y)) / 2` and
/// likewise for `Gy`, with edge-clamped samples, so border pixels see a
/// one-sided half difference. The output has the magnitude in channel 0 and
/// `atan2(Gy, Gx)` in channel 1, in radians with the y axis pointing down
/// the rows.
pub fn compute_magnitude_orientation(image: &Image) -> Result<Image> {
    image.ensure_single_channel()?;

    let kernel = CentralDifferenceKernel::new();
    let buffer = image.buffer();
    let x_gradient = filter_1d_convolution(buffer, FilterDirection::Horizontal, &kernel);
    let y_gradient = filter_1d_convolution(buffer, FilterDirection::Vertical, &kernel);

    let (height, width) = buffer.shape();
    let magnitude: DMatrix<Float> = par_matrix_from_fn(height, width, |y, x| x_gradient[(y,x)].hypot(y_gradient[(y,x)]));
    let orientation: DMatrix<Float> = par_matrix_from_fn(height, width, |y, x| y_gradient[(y,x)].atan2(x_gradient[(y,x)]));

    Image::from_channels(vec![magnitude, orientation], ImageEncoding::F64)
}
