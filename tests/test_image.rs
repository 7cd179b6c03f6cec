extern crate nalgebra as na;

use image::{GrayImage, Luma};
use na::DMatrix;
use rand::{Rng, SeedableRng, rngs::StdRng};

use sift_detector::{Float, Image, SiftError};
use sift_detector::image::{image_encoding::ImageEncoding, grayscale::to_grayscale, difference_of_gaussians::difference_of_gaussians};

fn random_image(rng: &mut StdRng, width: usize, height: usize, channels: usize) -> Image {
    let samples: Vec<Float> = (0..width*height*channels).map(|_| rng.gen_range(0.0..255.0)).collect();
    Image::from_interleaved(width, height, channels, &samples, ImageEncoding::F64).unwrap()
}

#[test]
fn empty_images_are_rejected() {
    assert!(matches!(Image::from_matrix(DMatrix::<Float>::zeros(0, 4), ImageEncoding::F64), Err(SiftError::EmptyImage)));
    assert!(matches!(Image::from_channels(vec![], ImageEncoding::F64), Err(SiftError::InvalidChannelCount(0))));
    assert!(matches!(Image::from_interleaved(0, 3, 1, &[], ImageEncoding::F64), Err(SiftError::EmptyImage)));
}

#[test]
fn mismatched_planes_are_rejected() {
    let planes = vec![DMatrix::<Float>::zeros(3, 4), DMatrix::<Float>::zeros(4, 3)];
    match Image::from_channels(planes, ImageEncoding::F64) {
        Err(SiftError::DimensionMismatch { expected, actual }) => {
            assert_eq!(expected, (4, 3, 2));
            assert_eq!(actual, (3, 4, 2));
        },
        other => panic!("expected a dimension mismatch, got {:?}", other)
    }

    let too_short = vec![0.0; 5];
    assert!(matches!(Image::from_interleaved(2, 2, 2, &too_short, ImageEncoding::F64), Err(SiftError::DimensionMismatch { .. })));
}

#[test]
fn gray_image_conversion_keeps_layout() {
    let gray = GrayImage::from_fn(4, 3, |x, y| Luma([(x + 10*y) as u8]));
    let image = Image::from_gray_image(&gray, false).unwrap();
    assert_eq!(image.shape(), (4, 3, 1));
    assert_eq!(image.get(3, 2, 0), 23.0);
    assert_eq!(image.to_image(), GrayImage::from_fn(4, 3, |x, y| Luma([((x + 10*y) as Float * (255.0 / 23.0)).round() as u8])));

    let normalized = Image::from_gray_image(&gray, true).unwrap();
    assert!((normalized.get(3, 2, 0) - 1.0).abs() < 1e-12);
}

#[test]
fn grayscale_uses_bt601_weights() {
    let red = Image::from_interleaved(1, 1, 3, &[1.0, 0.0, 0.0], ImageEncoding::U8).unwrap();
    let green = Image::from_interleaved(1, 1, 3, &[0.0, 1.0, 0.0], ImageEncoding::U8).unwrap();
    let blue_with_alpha = Image::from_interleaved(1, 1, 4, &[0.0, 0.0, 1.0, 1.0], ImageEncoding::U8).unwrap();

    assert!((to_grayscale(&red).unwrap().get(0, 0, 0) - 0.299).abs() < 1e-12);
    assert!((to_grayscale(&green).unwrap().get(0, 0, 0) - 0.587).abs() < 1e-12);
    assert!((to_grayscale(&blue_with_alpha).unwrap().get(0, 0, 0) - 0.114).abs() < 1e-12);
}

#[test]
fn grayscale_is_single_channel_and_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    for channels in [1, 3, 4] {
        let image = random_image(&mut rng, 9, 6, channels);
        let gray = to_grayscale(&image).unwrap();
        assert_eq!(gray.channel_count(), 1);
        assert_eq!(gray.shape(), (9, 6, 1));
        assert_eq!(to_grayscale(&gray).unwrap(), gray);
    }
}

#[test]
fn grayscale_rejects_unsupported_channel_counts() {
    let mut rng = StdRng::seed_from_u64(3);
    let two_channels = random_image(&mut rng, 4, 4, 2);
    assert!(matches!(to_grayscale(&two_channels), Err(SiftError::InvalidChannelCount(2))));
    let five_channels = random_image(&mut rng, 4, 4, 5);
    assert!(matches!(to_grayscale(&five_channels), Err(SiftError::InvalidChannelCount(5))));
}

#[test]
fn downsample_halves_with_ceiling() {
    let image = Image::from_matrix(DMatrix::<Float>::from_fn(3, 5, |y, x| (10*y + x) as Float), ImageEncoding::F64).unwrap();
    let half = image.downsample_half();
    assert_eq!(half.shape(), (3, 2, 1));
    assert_eq!(half.get(0, 0, 0), 0.0);
    assert_eq!(half.get(2, 1, 0), 24.0);
    assert_eq!(half.get(1, 1, 0), 22.0);

    let even = Image::from_element(64, 64, 3, 1.0, ImageEncoding::F64).unwrap().downsample_half();
    assert_eq!(even.shape(), (32, 32, 3));
}

#[test]
fn downsample_of_single_pixel_is_single_pixel() {
    let pixel = Image::from_element(1, 1, 1, 42.0, ImageEncoding::U8).unwrap();
    let half = pixel.downsample_half();
    assert_eq!(half.shape(), (1, 1, 1));
    assert_eq!(half.get(0, 0, 0), 42.0);
}

#[test]
fn dog_of_identical_images_is_zero() {
    let mut rng = StdRng::seed_from_u64(5);
    let image = random_image(&mut rng, 12, 7, 3);
    let dog = difference_of_gaussians(&image, &image).unwrap();
    assert_eq!(dog.shape(), image.shape());
    assert!(dog.channels().iter().all(|c| c.iter().all(|&v| v == 0.0)));
}

#[test]
fn dog_is_antisymmetric() {
    let mut rng = StdRng::seed_from_u64(17);
    let lo = random_image(&mut rng, 10, 8, 1);
    let hi = random_image(&mut rng, 10, 8, 1);
    let forward = difference_of_gaussians(&lo, &hi).unwrap();
    let backward = difference_of_gaussians(&hi, &lo).unwrap();
    for (f, b) in forward.buffer().iter().zip(backward.buffer().iter()) {
        assert_eq!(*f, -*b);
    }
    assert_eq!(forward.get(3, 4, 0), hi.get(3, 4, 0) - lo.get(3, 4, 0));
}

#[test]
fn dog_rejects_shape_mismatch() {
    let a = Image::from_element(4, 4, 1, 0.0, ImageEncoding::F64).unwrap();
    let b = Image::from_element(4, 5, 1, 0.0, ImageEncoding::F64).unwrap();
    let c = Image::from_element(4, 4, 3, 0.0, ImageEncoding::F64).unwrap();
    assert!(matches!(difference_of_gaussians(&a, &b), Err(SiftError::DimensionMismatch { .. })));
    assert!(matches!(difference_of_gaussians(&a, &c), Err(SiftError::DimensionMismatch { expected: (4, 4, 1), actual: (4, 4, 3) })));
}
