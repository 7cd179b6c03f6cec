use crate::error::Result;
use crate::image::{Image, image_encoding::ImageEncoding};

/// Pixelwise `hi - lo` for every channel, where `hi` is the more blurred image.
/// The result is signed and not clamped.
pub fn difference_of_gaussians(lo: &Image, hi: &Image) -> Result<Image> {
    lo.ensure_same_shape(hi)?;

    let channels = hi.channels().iter().zip(lo.channels().iter()).map(|(h, l)| h - l).collect();
    Image::from_channels(channels, ImageEncoding::F64)
}
