#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 对量化后的 3D 体数据 (ROI) 计算灰度共生矩阵 (GLCM) 纹理特征.
//!
//! 该 crate 实现 3D 方向合并 (merged) 变体: 对 26-邻域上半空间的 13
//! 个独立方向分别构建共生矩阵, 对称化并归一化后计算 25 个标量统计量,
//! 最后对 13 个方向取算术平均.
//!
//! # 注意
//!
//! 1. 体数据在进入本 crate 之前必须已经完成灰度量化 (整数灰度级, 从 1 开始)
//!    和 ROI 掩膜 (ROI 之外的体素以 `NaN` 标记). 本 crate 不做量化工作.
//! 2. 灰度级超出 `[1, G]` 范围说明上游量化有 bug, 程序会以 `Err` 快速失败,
//!    而不会静默写坏矩阵. As what Rust promises.
//!
//! # 开发计划
//!
//! ### 13 方向枚举与邻居对提取 ✅
//!
//! 实现位于 `glcm-berry/src/glcm/direction.rs` 和 `glcm-berry/src/glcm/matrix.rs`.
//!
//! ### 共生矩阵对称化 / 归一化 ✅
//!
//! 全路径零保护: 无有效邻居对的退化方向得到全零概率矩阵, 不会除零.
//!
//! 实现位于 `glcm-berry/src/glcm/matrix.rs`.
//!
//! ### 25 个纹理统计量 ✅
//!
//! 包括联合统计量, 差/和边缘分布统计量, 矩类统计量与两个信息相关性度量.
//!
//! 实现位于 `glcm-berry/src/glcm/features.rs`.
//!
//! ### 方向平均驱动 (串行 + rayon 并行) ✅
//!
//! 13 个方向之间没有数据依赖, 并行驱动按方向切分任务, 汇合后求和.
//!
//! 实现位于 `glcm-berry/src/glcm/merge3d.rs`.
//!
//! ### CSV 特征落盘 ✅
//!
//! 实现位于 `glcm-berry/src/output.rs`.

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 三维有符号偏移量.
pub type Offset3d = (isize, isize, isize);

pub mod consts;

/// 量化 3D 体数据基础数据结构.
mod data;

pub use data::GreyVolume;

pub mod glcm;

pub use glcm::{
    merged_directions, merged_features_3d, Direction, FeatureVector, GlcmError, GlcmResult,
    FEATURE_LABELS,
};

#[cfg(feature = "rayon")]
pub use glcm::par_merged_features_3d;

pub mod output;

pub mod prelude;
