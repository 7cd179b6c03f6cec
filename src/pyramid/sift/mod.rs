use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use log::{info, warn};

use crate::Float;
use crate::error::{Result, SiftError};
use crate::image::{Image, grayscale::to_grayscale};
use crate::features::{CandidateMap, keypoint::Keypoint};
use crate::pyramid::Pyramid;
use self::{sift_octave::SiftOctave, sift_runtime_params::SiftRuntimeParams};

pub mod sift_octave;
pub mod sift_runtime_params;

pub type SiftPyramid = Pyramid<SiftOctave>;

/// Cooperative cancellation, checked before each octave is built.
#[derive(Debug,Clone,Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The result of one octave: keypoints plus the edge-rejected candidate maps
/// they were read from, kept for inspection.
#[derive(Debug,Clone)]
pub struct OctaveDetections {
    pub octave_level: usize,
    pub keypoints: Vec<Keypoint>,
    pub candidate_maps: Vec<CandidateMap>
}

impl OctaveDetections {
    pub fn from_octave(octave: &SiftOctave, octave_level: usize) -> OctaveDetections {
        OctaveDetections {
            octave_level,
            keypoints: octave.keypoints(octave_level),
            candidate_maps: octave.candidate_maps.clone()
        }
    }
}

/// Runs the octave pipeline `octave_count` times, each octave seeded with the
/// downsampled hand-off level of the previous one.
///
/// Colour input is converted to grayscale first. The first failing stage
/// aborts the remaining octaves.
pub fn build_sift_pyramid(image: &Image, runtime_params: &SiftRuntimeParams, cancellation: Option<&CancellationToken>) -> Result<SiftPyramid> {
    runtime_params.validate()?;

    let mut pyramid = SiftPyramid::empty(runtime_params.octave_count);
    let mut octave_image = to_grayscale(image)?;

    for i in 0..runtime_params.octave_count {
        if cancellation.map_or(false, |token| token.is_cancelled()) {
            return Err(SiftError::Cancelled { completed_octaves: i });
        }

        if i > 0 {
            octave_image = pyramid.octaves[i-1].handoff_image(runtime_params.handoff_level)?;
        }

        if octave_image.width() < 3 || octave_image.height() < 3 {
            warn!("octave {}: {}x{} image has no interior pixels, no keypoints can be found", i, octave_image.width(), octave_image.height());
        }

        let octave = SiftOctave::build_octave(&octave_image, runtime_params.sigma, runtime_params.edge_r)?;
        info!("octave {}: {} keypoints on {}x{}", i, octave.candidate_maps.iter().map(|m| m.candidate_count()).sum::<usize>(), octave.width(), octave.height());
        pyramid.octaves.push(octave);
    }

    Ok(pyramid)
}

pub fn detect_keypoints_with_params(image: &Image, runtime_params: &SiftRuntimeParams, cancellation: Option<&CancellationToken>) -> Result<Vec<OctaveDetections>> {
    let pyramid = build_sift_pyramid(image, runtime_params, cancellation)?;
    Ok(pyramid.octaves.iter().enumerate().map(|(octave_level, octave)| OctaveDetections::from_octave(octave, octave_level)).collect())
}

/// Keypoints and diagnostic candidate maps for every octave.
pub fn detect_keypoints(image: &Image, sigma: Float, edge_threshold: Float, num_octaves: usize) -> Result<Vec<OctaveDetections>> {
    detect_keypoints_with_params(image, &SiftRuntimeParams::new(sigma, edge_threshold, num_octaves), None)
}

/// All keypoints of all octaves in octave order.
pub fn flatten_keypoints(detections: &[OctaveDetections]) -> Vec<Keypoint> {
    detections.iter().flat_map(|d| d.keypoints.iter().cloned()).collect()
}
