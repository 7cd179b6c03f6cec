extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{DynamicImage, GrayImage, Luma, Pixel, RgbImage, RgbaImage};
use image_rs::flat::NormalForm;
use na::{DMatrix, Scalar};
use rayon::prelude::*;

use crate::Float;
use crate::error::{Result, SiftError};
use self::image_encoding::ImageEncoding;

pub mod image_encoding;
pub mod grayscale;
pub mod filter;
pub mod gradient;
pub mod difference_of_gaussians;

/// A dense image of `channel_count` planes, each `height x width`.
///
/// Planes are stored as matrices indexed `(y, x)`. An `Image` is never
/// mutated after construction; every filter returns a new one.
#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    channels: Vec<DMatrix<Float>>,
    original_encoding: ImageEncoding
}

impl Image {

    pub fn from_matrix(matrix: DMatrix<Float>, original_encoding: ImageEncoding) -> Result<Image> {
        Image::from_channels(vec![matrix], original_encoding)
    }

    pub fn from_channels(channels: Vec<DMatrix<Float>>, original_encoding: ImageEncoding) -> Result<Image> {
        let (height, width) = match channels.first() {
            Some(first) => first.shape(),
            None => return Err(SiftError::InvalidChannelCount(0))
        };

        if height == 0 || width == 0 {
            return Err(SiftError::EmptyImage);
        }

        let channel_count = channels.len();
        if let Some(other) = channels.iter().find(|c| c.shape() != (height, width)) {
            return Err(SiftError::DimensionMismatch {
                expected: (width, height, channel_count),
                actual: (other.ncols(), other.nrows(), channel_count)
            });
        }

        Ok(Image { channels, original_encoding })
    }

    pub fn from_element(width: usize, height: usize, channel_count: usize, value: Float, original_encoding: ImageEncoding) -> Result<Image> {
        let channels = (0..channel_count).map(|_| DMatrix::<Float>::from_element(height, width, value)).collect();
        Image::from_channels(channels, original_encoding)
    }

    /// Builds an image from a row-major, channel-interleaved sample buffer.
    /// A buffer of the wrong length is reported as `(len, 1, 1)`.
    pub fn from_interleaved(width: usize, height: usize, channel_count: usize, samples: &[Float], original_encoding: ImageEncoding) -> Result<Image> {
        if width == 0 || height == 0 {
            return Err(SiftError::EmptyImage);
        }
        if channel_count == 0 {
            return Err(SiftError::InvalidChannelCount(0));
        }

        let expected_len = width * height * channel_count;
        if samples.len() != expected_len {
            return Err(SiftError::DimensionMismatch {
                expected: (expected_len, 1, 1),
                actual: (samples.len(), 1, 1)
            });
        }

        let channels = (0..channel_count)
            .map(|c| DMatrix::<Float>::from_fn(height, width, |y, x| samples[(y * width + x) * channel_count + c]))
            .collect();
        Image::from_channels(channels, original_encoding)
    }

    pub fn from_gray_image(image: &GrayImage, normalize: bool) -> Result<Image> {
        let mut buffer = Image::image8_to_matrix(image, 0);

        if normalize {
            let max = buffer.amax();
            if max > 0.0 {
                buffer /= max;
            }
        }

        Image::from_matrix(buffer, ImageEncoding::U8)
    }

    pub fn from_rgb_image(image: &RgbImage) -> Result<Image> {
        let channels = (0..3).map(|c| Image::image8_to_matrix(image, c)).collect();
        Image::from_channels(channels, ImageEncoding::U8)
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Result<Image> {
        let channels = (0..4).map(|c| Image::image8_to_matrix(image, c)).collect();
        Image::from_channels(channels, ImageEncoding::U8)
    }

    /// Gray sources stay single-channel, sources with alpha become RGBA and
    /// everything else RGB. Samples are converted to 8 bit first.
    pub fn from_dynamic_image(image: &DynamicImage) -> Result<Image> {
        let color = image.color();
        match (color.has_color(), color.has_alpha()) {
            (false, _) => Image::from_gray_image(&image.to_luma8(), false),
            (true, true) => Image::from_rgba_image(&image.to_rgba8()),
            (true, false) => Image::from_rgb_image(&image.to_rgb8())
        }
    }

    /// Channel 0 rescaled to the full 8 bit range.
    pub fn to_image(&self) -> GrayImage {
        Image::matrix_to_image(&self.channels[0], self.original_encoding)
    }

    pub fn to_interleaved(&self) -> Vec<Float> {
        let (width, height, channel_count) = self.shape();
        let mut samples = Vec::with_capacity(width * height * channel_count);
        for y in 0..height {
            for x in 0..width {
                for channel in &self.channels {
                    samples.push(channel[(y, x)]);
                }
            }
        }
        samples
    }

    pub fn width(&self) -> usize {
        self.channels[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.channels[0].nrows()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// (width, height, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width(), self.height(), self.channel_count())
    }

    pub fn original_encoding(&self) -> ImageEncoding {
        self.original_encoding
    }

    pub fn channels(&self) -> &[DMatrix<Float>] {
        &self.channels
    }

    /// Panics if `channel` is out of range, like slice indexing.
    pub fn channel(&self, channel: usize) -> &DMatrix<Float> {
        &self.channels[channel]
    }

    /// The first plane, which is the whole image for grayscale input.
    pub fn buffer(&self) -> &DMatrix<Float> {
        &self.channels[0]
    }

    pub fn get(&self, x: usize, y: usize, channel: usize) -> Float {
        self.channels[channel][(y, x)]
    }

    /// Point sampled decimation: output (x, y) is input (2x, 2y).
    /// The output is `ceil(width/2) x ceil(height/2)`, so a 1x1 image stays 1x1.
    pub fn downsample_half(&self) -> Image {
        let new_width = (self.width() + 1) / 2;
        let new_height = (self.height() + 1) / 2;

        let channels = self.channels.iter()
            .map(|buffer| DMatrix::<Float>::from_fn(new_height, new_width, |y, x| buffer[(2 * y, 2 * x)]))
            .collect();

        Image { channels, original_encoding: self.original_encoding }
    }

    pub fn ensure_same_shape(&self, other: &Image) -> Result<()> {
        match self.shape() == other.shape() {
            true => Ok(()),
            false => Err(SiftError::DimensionMismatch { expected: self.shape(), actual: other.shape() })
        }
    }

    pub fn ensure_single_channel(&self) -> Result<()> {
        match self.channel_count() {
            1 => Ok(()),
            n => Err(SiftError::InvalidChannelCount(n))
        }
    }

    /// Applies `f` to every plane. Shape preservation is up to `f`.
    pub(crate) fn map_channels<F>(&self, original_encoding: ImageEncoding, f: F) -> Image where F: Fn(&DMatrix<Float>) -> DMatrix<Float> {
        Image { channels: self.channels.iter().map(f).collect(), original_encoding }
    }

    fn image8_to_matrix<P: Pixel<Subpixel = u8>>(image: &image_rs::ImageBuffer<P, Vec<u8>>, channel: usize) -> DMatrix<Float> {
        debug_assert!(image.sample_layout().is_normal(NormalForm::RowMajorPacked));

        let (width, height) = image.dimensions();
        DMatrix::<Float>::from_fn(height as usize, width as usize, |y, x| {
            image.get_pixel(x as u32, y as u32).channels()[channel] as Float
        })
    }

    fn matrix_to_image(matrix: &DMatrix<Float>, encoding: ImageEncoding) -> GrayImage {
        let (rows, cols) = matrix.shape();

        let mut gray_image = GrayImage::new(cols as u32, rows as u32);
        let max = matrix.max();
        let min = matrix.min();
        for c in 0..cols {
            for r in 0..rows {
                let val = matrix[(r, c)];
                let pixel_value = encoding.normalize_to_gray(max, min, val);
                gray_image.put_pixel(c as u32, r as u32, Luma([pixel_value]));
            }
        }
        gray_image
    }
}

/// Fills a `nrows x ncols` matrix column by column in parallel.
/// Every worker owns a disjoint set of columns of the output.
pub(crate) fn par_matrix_from_fn<T, F>(nrows: usize, ncols: usize, f: F) -> DMatrix<T> where T: Scalar + Send, F: Fn(usize, usize) -> T + Sync {
    let f = &f;
    let column_major: Vec<T> = (0..ncols)
        .into_par_iter()
        .flat_map_iter(move |c| (0..nrows).map(move |r| f(r, c)))
        .collect();
    DMatrix::from_vec(nrows, ncols, column_major)
}
