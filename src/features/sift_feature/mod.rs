extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::error::Result;
use crate::image::{Image, par_matrix_from_fn};
use crate::features::{CandidateMap, Extremum};

/// Flags the pixels of `current` that are strict extrema of their 3x3x3
/// neighbourhood across `prev`, `current` and `next`.
///
/// The one-pixel border lacks a full neighbourhood and is never flagged.
/// Equal neighbours disqualify a pixel, so plateaus produce no candidates.
pub fn detect_extrema(prev: &Image, current: &Image, next: &Image, sigma: Float) -> Result<CandidateMap> {
    current.ensure_single_channel()?;
    current.ensure_same_shape(prev)?;
    current.ensure_same_shape(next)?;

    let image_buffer = current.buffer();
    let prev_buffer = prev.buffer();
    let next_buffer = next.buffer();
    let (height, width) = image_buffer.shape();

    let flags = par_matrix_from_fn(height, width, |y, x| {
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            return None;
        }

        let sample_value = image_buffer[(y,x)];
        let (is_smallest_curr, is_largest_curr) = is_sample_extrema_in_neighbourhood(sample_value, x, y, image_buffer, true);
        if !(is_smallest_curr || is_largest_curr) {
            return None;
        }
        let (is_smallest_prev, is_largest_prev) = is_sample_extrema_in_neighbourhood(sample_value, x, y, prev_buffer, false);
        let (is_smallest_next, is_largest_next) = is_sample_extrema_in_neighbourhood(sample_value, x, y, next_buffer, false);

        match (is_smallest_curr && is_smallest_prev && is_smallest_next, is_largest_curr && is_largest_prev && is_largest_next) {
            (true, _) => Some(Extremum::Minimum),
            (_, true) => Some(Extremum::Maximum),
            _ => None
        }
    });

    CandidateMap::new(flags, sigma)
}

/// Returns whether `sample` is strictly smaller / strictly larger than every
/// value in the 3x3 window around `(x_sample, y_sample)`.
fn is_sample_extrema_in_neighbourhood(sample: Float, x_sample: usize, y_sample: usize, neighbourhood_buffer: &DMatrix<Float>, skip_center: bool) -> (bool,bool) {

    let mut is_smallest = true;
    let mut is_largest = true;

    for y in y_sample-1..y_sample+2 {
        for x in x_sample-1..x_sample+2 {

            if x == x_sample && y == y_sample && skip_center {
                continue;
            }

            let value = neighbourhood_buffer[(y,x)];
            is_smallest &= sample < value;
            is_largest &= sample > value;

            if !(is_smallest || is_largest) {
                return (false, false);
            }
        }
    }

    (is_smallest,is_largest)
}
