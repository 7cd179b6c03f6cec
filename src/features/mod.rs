extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{GrayImage, Luma};
use na::DMatrix;
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::error::{Result, SiftError};
use crate::image::Image;

pub mod sift_feature;
pub mod hessian_response;
pub mod keypoint;

#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Extremum {
    Minimum,
    Maximum
}

/// Per-pixel extremum flags aligned to one DoG level.
///
/// Cells are `None` for pixels that are not candidates. The map carries the
/// sigma of the DoG level it was detected on.
#[derive(Debug,Clone,PartialEq)]
pub struct CandidateMap {
    buffer: DMatrix<Option<Extremum>>,
    sigma: Float
}

impl CandidateMap {

    pub fn new(buffer: DMatrix<Option<Extremum>>, sigma: Float) -> Result<CandidateMap> {
        if buffer.nrows() == 0 || buffer.ncols() == 0 {
            return Err(SiftError::EmptyImage);
        }
        Ok(CandidateMap { buffer, sigma })
    }

    pub fn empty(width: usize, height: usize, sigma: Float) -> Result<CandidateMap> {
        CandidateMap::new(DMatrix::from_element(height, width, None), sigma)
    }

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    /// (width, height, channels) for comparison with `Image::shape`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width(), self.height(), 1)
    }

    pub fn sigma(&self) -> Float {
        self.sigma
    }

    pub fn buffer(&self) -> &DMatrix<Option<Extremum>> {
        &self.buffer
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Extremum> {
        self.buffer[(y, x)]
    }

    pub fn candidate_count(&self) -> usize {
        self.buffer.iter().filter(|c| c.is_some()).count()
    }

    /// Flagged pixels as `(x, y, kind)` in row-major scan order.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, usize, Extremum)> + '_ {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter_map(move |(x, y)| self.get(x, y).map(|kind| (x, y, kind)))
    }

    /// Diagnostic rendering: 0 for no candidate, 128 for minima, 255 for maxima.
    pub fn to_image(&self) -> GrayImage {
        let mut gray_image = GrayImage::new(self.width() as u32, self.height() as u32);
        for (x, y, kind) in self.candidates() {
            let value = match kind {
                Extremum::Minimum => 128,
                Extremum::Maximum => 255
            };
            gray_image.put_pixel(x as u32, y as u32, Luma([value]));
        }
        gray_image
    }

    pub fn ensure_aligned_with(&self, image: &Image) -> Result<()> {
        match (image.width(), image.height()) == (self.width(), self.height()) {
            true => Ok(()),
            false => Err(SiftError::DimensionMismatch { expected: self.shape(), actual: image.shape() })
        }
    }
}
