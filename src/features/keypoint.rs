use std::fmt;
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::features::{CandidateMap, Extremum};

/// A detected feature: pixel location inside its octave, the sigma of the
/// DoG level it was found on and the kind of extremum.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
pub struct Keypoint {
    pub x: usize,
    pub y: usize,
    pub sigma: Float,
    pub octave_level: usize,
    pub extremum: Extremum
}

impl Keypoint {
    /// Location in the pixel grid of the base (octave 0) image.
    pub fn reconstruct_original_coordinates(&self) -> (usize, usize) {
        let factor = 2usize.pow(self.octave_level as u32);
        (self.x*factor, self.y*factor)
    }

    /// Sigma expressed in base image pixels.
    pub fn base_sigma(&self) -> Float {
        self.sigma*(self.octave_level as Float).exp2()
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x: {}, y: {}, sigma: {}, octave: {}, {:?}", self.x, self.y, self.sigma, self.octave_level, self.extremum)
    }
}

/// One keypoint per flagged pixel in row-major scan order.
pub fn locate_keypoints(candidate_map: &CandidateMap, octave_level: usize) -> Vec<Keypoint> {
    let sigma = candidate_map.sigma();
    candidate_map.candidates()
        .map(|(x, y, extremum)| Keypoint { x, y, sigma, octave_level, extremum })
        .collect()
}
