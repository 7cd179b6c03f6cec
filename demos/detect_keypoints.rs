extern crate image as image_rs;
extern crate sift_detector;
extern crate color_eyre;

use std::{env, fs, path::Path};
use color_eyre::eyre::{eyre, Result};
use sift_detector::{Image, SiftRuntimeParams, build_sift_pyramid, compute_magnitude_orientation};
use sift_detector::image::gradient::MAGNITUDE_CHANNEL;
use sift_detector::pyramid::sift::OctaveDetections;

// Usage: detect_keypoints <image> [params.yaml] [output folder]
fn main() -> Result<()> {

    color_eyre::install()?;

    let args: Vec<String> = env::args().collect();
    let image_path = args.get(1).ok_or_else(|| eyre!("usage: detect_keypoints <image> [params.yaml] [output folder]"))?;
    let runtime_params = match args.get(2) {
        Some(yaml_path) => SiftRuntimeParams::load(yaml_path)?,
        None => SiftRuntimeParams::default()
    };
    let image_out_folder = args.get(3).map(String::as_str).unwrap_or("output/");
    fs::create_dir_all(image_out_folder)?;

    println!("{}", runtime_params.to_yaml_string()?);

    let dynamic_image = image_rs::open(&Path::new(image_path))?;
    let image = Image::from_dynamic_image(&dynamic_image)?;

    let pyramid = build_sift_pyramid(&image, &runtime_params, None)?;

    for (octave_level, octave) in pyramid.octaves.iter().enumerate() {
        let detections = OctaveDetections::from_octave(octave, octave_level);
        println!("octave {}: {} keypoints", octave_level, detections.keypoints.len());
        for keypoint in &detections.keypoints {
            println!("{}", keypoint);
        }

        for (i, dog) in octave.dog_levels.iter().enumerate() {
            dog.image.to_image().save(format!("{}octave_{}_dog_{}.png", image_out_folder, octave_level, i))?;
        }
        for (i, map) in octave.extrema_maps.iter().enumerate() {
            map.to_image().save(format!("{}octave_{}_extrema_{}.png", image_out_folder, octave_level, i))?;
        }
        for (i, map) in detections.candidate_maps.iter().enumerate() {
            map.to_image().save(format!("{}octave_{}_keypoints_{}.png", image_out_folder, octave_level, i))?;
        }

        let magnitude_orientation = compute_magnitude_orientation(&octave.scale_levels[0].image)?;
        let magnitude = Image::from_matrix(magnitude_orientation.channel(MAGNITUDE_CHANNEL).clone(), magnitude_orientation.original_encoding())?;
        magnitude.to_image().save(format!("{}octave_{}_magnitude.png", image_out_folder, octave_level))?;
    }

    Ok(())
}
