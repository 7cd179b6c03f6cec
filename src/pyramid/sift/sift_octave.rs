use log::debug;

use crate::Float;
use crate::error::{Result, SiftError};
use crate::image::{Image, difference_of_gaussians::difference_of_gaussians};
use crate::image::filter::{gauss_kernel::GaussKernel1D, gaussian_2_d_convolution};
use crate::features::{CandidateMap, sift_feature::detect_extrema, hessian_response::reject_edge_responses};
use crate::features::keypoint::{Keypoint, locate_keypoints};

pub const SCALE_LEVEL_COUNT: usize = 5;
pub const DOG_LEVEL_COUNT: usize = SCALE_LEVEL_COUNT - 1;
/// Scale levels per doubling of sigma, which makes k = sqrt(2).
pub const LEVELS_PER_DOUBLING: usize = 2;
/// Blur level at twice the base sigma.
pub const DEFAULT_HANDOFF_LEVEL: usize = LEVELS_PER_DOUBLING;
/// (prev, current, next) DoG indices searched for extrema.
pub const EXTREMA_TRIPLETS: [(usize,usize,usize); 2] = [(0,1,2),(1,2,3)];

#[derive(Debug,Clone)]
pub struct ScaleLevel {
    pub image: Image,
    pub sigma: Float
}

/// `hi - lo` of two adjacent scale levels, tagged with the sigma of `hi`.
#[derive(Debug,Clone)]
pub struct DogLevel {
    pub image: Image,
    pub sigma: Float
}

/// All products of one octave. `extrema_maps` are the raw 26-neighbour
/// extrema and `candidate_maps` the same maps after edge rejection, one per
/// entry of `EXTREMA_TRIPLETS`.
#[derive(Debug,Clone)]
pub struct SiftOctave {
    pub scale_levels: Vec<ScaleLevel>,
    pub dog_levels: Vec<DogLevel>,
    pub extrema_maps: Vec<CandidateMap>,
    pub candidate_maps: Vec<CandidateMap>
}

impl SiftOctave {

    pub fn build_octave(base_image: &Image, sigma: Float, edge_r: Float) -> Result<SiftOctave> {
        debug!("octave: building {} blur levels on {}x{} base, sigma {}", SCALE_LEVEL_COUNT, base_image.width(), base_image.height(), sigma);
        let scale_levels = build_scale_levels(base_image, sigma)?;

        let dog_levels = build_dog_levels(&scale_levels)?;
        debug!("octave: built {} DoG levels", dog_levels.len());

        let extrema_maps = detect_octave_extrema(&dog_levels)?;
        debug!("octave: extrema candidates {:?}", extrema_maps.iter().map(|m| m.candidate_count()).collect::<Vec<usize>>());

        let candidate_maps = reject_octave_edges(&extrema_maps, &dog_levels, edge_r)?;
        debug!("octave: candidates after edge rejection {:?}", candidate_maps.iter().map(|m| m.candidate_count()).collect::<Vec<usize>>());

        Ok(SiftOctave {scale_levels, dog_levels, extrema_maps, candidate_maps})
    }

    /// sigma * k^i for every scale level.
    pub fn generate_sigmas(sigma: Float) -> Vec<Float> {
        (0..SCALE_LEVEL_COUNT).map(|i| sigma*SiftOctave::generate_k(i as Float, LEVELS_PER_DOUBLING as Float)).collect()
    }

    fn generate_k(n: Float, s: Float) -> Float {
        assert!(n >= 0.0);
        let exp = n/s;
        exp.exp2()
    }

    /// The downsampled blur level that seeds the next octave.
    pub fn handoff_image(&self, handoff_level: usize) -> Result<Image> {
        match self.scale_levels.get(handoff_level) {
            Some(level) => Ok(level.image.downsample_half()),
            None => Err(SiftError::HandoffLevelOutOfRange { level: handoff_level, levels: self.scale_levels.len() })
        }
    }

    /// Keypoints of every edge-rejected map, in pass order and scan order within a pass.
    pub fn keypoints(&self, octave_level: usize) -> Vec<Keypoint> {
        self.candidate_maps.iter().flat_map(|map| locate_keypoints(map, octave_level)).collect()
    }

    pub fn width(&self) -> usize {
        self.scale_levels[0].image.width()
    }

    pub fn height(&self) -> usize {
        self.scale_levels[0].image.height()
    }
}

/// Every level is blurred directly from `base_image`.
pub fn build_scale_levels(base_image: &Image, sigma: Float) -> Result<Vec<ScaleLevel>> {
    SiftOctave::generate_sigmas(sigma).into_iter().map(|level_sigma| {
        let kernel = GaussKernel1D::new(level_sigma)?;
        Ok(ScaleLevel { image: gaussian_2_d_convolution(base_image, &kernel), sigma: level_sigma })
    }).collect()
}

pub fn build_dog_levels(scale_levels: &[ScaleLevel]) -> Result<Vec<DogLevel>> {
    scale_levels.windows(2).map(|pair| {
        let (lo, hi) = (&pair[0], &pair[1]);
        Ok(DogLevel { image: difference_of_gaussians(&lo.image, &hi.image)?, sigma: hi.sigma })
    }).collect()
}

// `dog_levels` always holds DOG_LEVEL_COUNT levels here, built by `build_dog_levels`.
fn detect_octave_extrema(dog_levels: &[DogLevel]) -> Result<Vec<CandidateMap>> {
    EXTREMA_TRIPLETS.iter().map(|&(prev, current, next)| {
        detect_extrema(&dog_levels[prev].image, &dog_levels[current].image, &dog_levels[next].image, dog_levels[current].sigma)
    }).collect()
}

/// Each extrema map is filtered against the DoG level it was detected on.
fn reject_octave_edges(extrema_maps: &[CandidateMap], dog_levels: &[DogLevel], edge_r: Float) -> Result<Vec<CandidateMap>> {
    extrema_maps.iter().zip(EXTREMA_TRIPLETS.iter()).map(|(map, &(_, current, _))| {
        reject_edge_responses(map, &dog_levels[current].image, edge_r)
    }).collect()
}
