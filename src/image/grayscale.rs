extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::error::{Result, SiftError};
use super::Image;

/// ITU-R BT.601 luma weights for R, G and B.
pub const LUMA_WEIGHTS: [Float; 3] = [0.299, 0.587, 0.114];

/// Reduces an image to a single luminance channel.
///
/// Single-channel input is returned unchanged, which makes the conversion
/// idempotent. The alpha plane of a 4-channel image does not contribute.
pub fn to_grayscale(image: &Image) -> Result<Image> {
    match image.channel_count() {
        1 => Ok(image.clone()),
        3 | 4 => {
            let channels = image.channels();
            let luma: DMatrix<Float> = LUMA_WEIGHTS.iter()
                .zip(channels.iter())
                .fold(DMatrix::<Float>::zeros(image.height(), image.width()), |acc, (&weight, channel)| acc + channel * weight);
            Image::from_matrix(luma, image.original_encoding())
        },
        n => Err(SiftError::InvalidChannelCount(n))
    }
}
