extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::error::Result;
use crate::image::{Image, image_encoding::ImageEncoding, par_matrix_from_fn};
use self::{kernel::Kernel, gauss_kernel::GaussKernel1D};

pub mod kernel;
pub mod gauss_kernel;
pub mod central_difference_kernel;

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum FilterDirection {
    Horizontal,
    Vertical
}

/// Correlates every row (`Horizontal`) or column (`Vertical`) of `buffer`
/// with the kernel taps.
///
/// Samples that fall outside the image are clamped to the nearest edge pixel.
/// The same border policy is used by every filter in this crate.
pub fn filter_1d_convolution(buffer: &DMatrix<Float>, filter_direction: FilterDirection, filter_kernel: &dyn Kernel) -> DMatrix<Float> {
    let kernel = filter_kernel.kernel();
    let step = filter_kernel.step();
    let kernel_radius_signed = filter_kernel.radius() as isize;
    let normalizing_constant = filter_kernel.normalizing_constant();
    let width = buffer.ncols();
    let height = buffer.nrows();

    par_matrix_from_fn(height, width, |y, x| {
        let mut acc = 0.0;
        for kernel_idx in (-kernel_radius_signed..kernel_radius_signed+1).step_by(step) {
            let sample_value = match filter_direction {
                FilterDirection::Horizontal => buffer[(y, clamp_index(x as isize + kernel_idx, width))],
                FilterDirection::Vertical => buffer[(clamp_index(y as isize + kernel_idx, height), x)]
            };

            let kernel_value = kernel[(0, (kernel_idx + kernel_radius_signed) as usize)];
            acc += sample_value*kernel_value;
        }
        acc/normalizing_constant
    })
}

fn clamp_index(idx: isize, len: usize) -> usize {
    match idx {
        idx if idx < 0 => 0,
        idx if idx >= len as isize => len - 1,
        _ => idx as usize
    }
}

/// Separable blur: a horizontal pass followed by a vertical pass on every channel.
pub fn gaussian_2_d_convolution(image: &Image, filter_kernel: &GaussKernel1D) -> Image {
    image.map_channels(ImageEncoding::F64, |buffer| {
        let blur_hor = filter_1d_convolution(buffer, FilterDirection::Horizontal, filter_kernel);
        filter_1d_convolution(&blur_hor, FilterDirection::Vertical, filter_kernel)
    })
}

pub fn gaussian_blur(image: &Image, sigma: Float) -> Result<Image> {
    let kernel = GaussKernel1D::new(sigma)?;
    Ok(gaussian_2_d_convolution(image, &kernel))
}

/// Blurs with `sigma` and then halves the resolution.
pub fn blur_and_downsample(image: &Image, sigma: Float) -> Result<Image> {
    Ok(gaussian_blur(image, sigma)?.downsample_half())
}
