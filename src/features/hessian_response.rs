extern crate nalgebra as na;

use na::{DMatrix, Matrix2};

use crate::Float;
use crate::error::{Result, SiftError};
use crate::image::{Image, par_matrix_from_fn};
use crate::features::CandidateMap;

/// Ratio of principal curvatures used by Lowe; candidates above it sit on edges.
pub const DEFAULT_EDGE_R: Float = 10.0;

/// 2x2 Hessian of `buffer` at `(x, y)` from central finite differences.
/// The caller guarantees a full 3x3 neighbourhood.
pub fn hessian_matrix(buffer: &DMatrix<Float>, x: usize, y: usize) -> Matrix2<Float> {
    let center = buffer[(y,x)];
    let dxx = buffer[(y,x+1)] - 2.0*center + buffer[(y,x-1)];
    let dyy = buffer[(y+1,x)] - 2.0*center + buffer[(y-1,x)];
    let dxy = (buffer[(y+1,x+1)] - buffer[(y-1,x+1)] - buffer[(y+1,x-1)] + buffer[(y-1,x-1)])/4.0;

    Matrix2::new(dxx,dxy,
                 dxy,dyy)
}

/// Returns `(trace^2 / det, (r+1)^2 / r)`.
pub fn eigenvalue_ratio(hessian: &Matrix2<Float>, r: Float) -> (Float,Float) {
    let trace = hessian.trace();
    let determinant = hessian.determinant();
    (trace.powi(2)/determinant, (r+1.0).powi(2)/r)
}

/// True when the curvature at the candidate is blob-like enough to keep.
/// Saddles (`det <= 0`) never pass.
pub fn accept_hessian(hessian: &Matrix2<Float>, r: Float) -> bool {
    let determinant = hessian.determinant();
    if !(determinant > 0.0) {
        return false;
    }
    let (ratio, r_ratio) = eigenvalue_ratio(hessian, r);
    ratio <= r_ratio
}

/// Clears candidates whose principal curvature ratio on `dog` exceeds `r`.
///
/// Candidates on the image border have no full neighbourhood and are cleared.
pub fn reject_edge_responses(candidate_map: &CandidateMap, dog: &Image, r: Float) -> Result<CandidateMap> {
    if !(r.is_finite() && r > 0.0) {
        return Err(SiftError::ThresholdOutOfRange(r));
    }
    dog.ensure_single_channel()?;
    candidate_map.ensure_aligned_with(dog)?;

    let buffer = dog.buffer();
    let (height, width) = buffer.shape();

    let refined = par_matrix_from_fn(height, width, |y, x| {
        let candidate = candidate_map.get(x, y)?;
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            return None;
        }
        match accept_hessian(&hessian_matrix(buffer, x, y), r) {
            true => Some(candidate),
            false => None
        }
    });

    CandidateMap::new(refined, candidate_map.sigma())
}
