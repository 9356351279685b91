//! 灰度共生矩阵 (GLCM) 纹理特征计算.
//!
//! 数据流按方向自上而下: 邻居对提取 -> 共生矩阵累加 -> 对称化 / 归一化
//! -> 统计量计算; 顶层驱动对 13 个方向取平均.

mod direction;
mod error;
mod features;
mod matrix;
mod merge3d;

pub use direction::{merged_directions, Direction};
pub use error::{GlcmError, GlcmResult};
pub use features::{FeatureVector, FEATURE_LABELS};
pub use merge3d::merged_features_3d;

#[cfg(feature = "rayon")]
pub use merge3d::par_merged_features_3d;

pub(crate) use matrix::{fill_cooccurrence, neighbour_pairs, symmetric_probabilities};
