extern crate nalgebra as na;

use na::DMatrix;
use rand::{Rng, SeedableRng, rngs::StdRng};

use sift_detector::{CandidateMap, Extremum, Keypoint};
use sift_detector::features::keypoint::locate_keypoints;

fn random_map(seed: u64, width: usize, height: usize) -> CandidateMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let buffer = DMatrix::<Option<Extremum>>::from_fn(height, width, |_, _| {
        match rng.gen_range(0..10) {
            0 => Some(Extremum::Minimum),
            1 => Some(Extremum::Maximum),
            _ => None
        }
    });
    CandidateMap::new(buffer, 2.5).unwrap()
}

#[test]
fn one_keypoint_per_flagged_pixel() {
    let map = random_map(42, 23, 17);
    let keypoints = locate_keypoints(&map, 1);

    assert_eq!(keypoints.len(), map.candidate_count());
    for keypoint in &keypoints {
        assert_eq!(map.get(keypoint.x, keypoint.y), Some(keypoint.extremum));
        assert_eq!(keypoint.sigma, 2.5);
        assert_eq!(keypoint.octave_level, 1);
    }
}

#[test]
fn keypoints_follow_row_major_order() {
    let map = random_map(7, 31, 12);
    let keypoints = locate_keypoints(&map, 0);
    assert!(!keypoints.is_empty());

    for pair in keypoints.windows(2) {
        assert!((pair[0].y, pair[0].x) < (pair[1].y, pair[1].x));
    }
}

#[test]
fn locating_is_deterministic() {
    let first = locate_keypoints(&random_map(99, 40, 40), 2);
    let second = locate_keypoints(&random_map(99, 40, 40), 2);
    assert_eq!(first, second);
}

#[test]
fn empty_map_yields_no_keypoints() {
    let map = CandidateMap::empty(8, 8, 1.0).unwrap();
    assert!(locate_keypoints(&map, 0).is_empty());
}

#[test]
fn coordinates_scale_back_to_the_base_image() {
    let keypoint = Keypoint { x: 5, y: 9, sigma: 2.0, octave_level: 2, extremum: Extremum::Maximum };
    assert_eq!(keypoint.reconstruct_original_coordinates(), (20, 36));
    assert_eq!(keypoint.base_sigma(), 8.0);

    let base = Keypoint { octave_level: 0, ..keypoint };
    assert_eq!(base.reconstruct_original_coordinates(), (5, 9));
    assert_eq!(base.base_sigma(), 2.0);
}

#[test]
fn candidate_map_renders_kinds() {
    let mut buffer = DMatrix::<Option<Extremum>>::from_element(3, 4, None);
    buffer[(1, 2)] = Some(Extremum::Minimum);
    buffer[(2, 3)] = Some(Extremum::Maximum);
    let rendered = CandidateMap::new(buffer, 1.0).unwrap().to_image();

    assert_eq!(rendered.dimensions(), (4, 3));
    assert_eq!(rendered.get_pixel(0, 0).0, [0]);
    assert_eq!(rendered.get_pixel(2, 1).0, [128]);
    assert_eq!(rendered.get_pixel(3, 2).0, [255]);
}
