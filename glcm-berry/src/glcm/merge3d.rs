//! 方向平均驱动: 对 13 个方向运行流水线并对统计量取平均.

use super::{fill_cooccurrence, neighbour_pairs, symmetric_probabilities};
use super::{merged_directions, Direction, FeatureVector, GlcmResult};
use crate::consts::MERGED_DIRECTIONS_3D;
use crate::GreyVolume;

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
    }
}

/// 运行单个方向的完整流水线: 提取 -> 累加 -> 对称化 / 归一化 -> 统计.
fn direction_features(
    volume: &GreyVolume,
    levels: usize,
    direction: Direction,
) -> GlcmResult<FeatureVector> {
    let pairs = neighbour_pairs(volume, direction);
    let counts = fill_cooccurrence(&pairs, levels)?;
    let probabilities = symmetric_probabilities(&counts);
    Ok(FeatureVector::from_probabilities(&probabilities))
}

/// 计算 3D 合并 GLCM 特征: 13 个方向分别计算统计量后取算术平均.
///
/// `levels` 是灰度级个数 G (即共生矩阵的边长), 由上游量化阶段提供.
/// 退化方向 (没有任何有效邻居对) 以全零统计量参与平均, 不会被跳过.
///
/// 输入不被修改, 重复调用得到完全相同的结果.
pub fn merged_features_3d(volume: &GreyVolume, levels: usize) -> GlcmResult<FeatureVector> {
    let mut sum = FeatureVector::default();
    for direction in merged_directions() {
        let fv = direction_features(volume, levels, direction)?;
        sum += &fv;
    }
    Ok(sum / MERGED_DIRECTIONS_3D as f64)
}

/// 借助 `rayon`, 以每方向一个任务的方式并行计算 3D 合并 GLCM 特征.
///
/// 方向之间没有数据依赖, 结果与串行版本 [`merged_features_3d`] 一致.
#[cfg(feature = "rayon")]
pub fn par_merged_features_3d(volume: &GreyVolume, levels: usize) -> GlcmResult<FeatureVector> {
    let directions: Vec<_> = merged_directions().collect();
    let per_direction = directions
        .into_par_iter()
        .map(|d| direction_features(volume, levels, d))
        .collect::<GlcmResult<Vec<_>>>()?;

    let mut sum = FeatureVector::default();
    for fv in &per_direction {
        sum += fv;
    }
    Ok(sum / MERGED_DIRECTIONS_3D as f64)
}
