use crate::Float;

/// The sample type an image was created from. Filter outputs are `F64`.
#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ImageEncoding {
    U8,
    F64
}

impl ImageEncoding {
    // https://en.wikipedia.org/wiki/Normalization_(image_processing)
    pub fn normalize_to_gray(&self, max: Float, min: Float, value: Float) -> u8 {
        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            return 0;
        }
        ((value - min) * (255.0 / range)).round() as u8
    }
}
