use thiserror::Error;

use crate::Float;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(usize),

    #[error("sigma must be a finite positive number, got {0}")]
    InvalidSigma(Float),

    /// Shapes are given as (width, height, channels).
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize)
    },

    #[error("edge threshold ratio must be a finite positive number, got {0}")]
    ThresholdOutOfRange(Float),

    #[error("image has no pixels")]
    EmptyImage,

    #[error("hand-off level {level} is outside the {levels} blur levels of an octave")]
    HandoffLevelOutOfRange { level: usize, levels: usize },

    #[error("detection cancelled after {completed_octaves} octave(s)")]
    Cancelled { completed_octaves: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;
