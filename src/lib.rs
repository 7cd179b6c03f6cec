//! Scale-invariant keypoint detection.
//!
//! Implements the detection half of SIFT: a Gaussian scale space per octave,
//! Difference-of-Gaussian levels, 26-neighbour extrema detection and
//! Hessian-based edge rejection.

pub mod error;
pub mod image;
pub mod features;
pub mod pyramid;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub use self::error::{Result, SiftError};
pub use self::image::{Image, gradient::compute_magnitude_orientation};
pub use self::features::{CandidateMap, Extremum, keypoint::Keypoint};
pub use self::pyramid::sift::{
    detect_keypoints,
    detect_keypoints_with_params,
    build_sift_pyramid,
    CancellationToken,
    OctaveDetections,
    flatten_keypoints,
    sift_runtime_params::SiftRuntimeParams
};
