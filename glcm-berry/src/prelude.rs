//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx3d, Offset3d};

pub use crate::data::GreyVolume;

pub use crate::glcm::{
    merged_directions, merged_features_3d, Direction, FeatureVector, GlcmError, GlcmResult,
    FEATURE_LABELS,
};

#[cfg(feature = "rayon")]
pub use crate::glcm::par_merged_features_3d;

pub use crate::output::{write_features, CsvSink, FeatureSink};

pub use crate::consts::{ANGLES, GLCM_FEATURE_COUNT, MERGED_DIRECTIONS_3D};
