//! 通用常量.

/// 3D 合并 GLCM 变体覆盖的独立方向个数.
///
/// 26-邻域的上半空间共有 13 个互不反平行的单位偏移.
/// 对称化使每个方向与其 180° 反方向等价, 因此只需枚举一半.
pub const MERGED_DIRECTIONS_3D: usize = 13;

/// 平面内角度列表 (度), 按固定迭代顺序排列.
///
/// 前四个角度分别与深度偏移 `{-1, 0, +1}` 组合;
/// 角度 0 是特殊情况, 只与深度偏移 `+1` 组合 (纯深度方向).
pub const ANGLES: [i32; 5] = [180, 135, 90, 45, 0];

/// 每个概率矩阵导出的标量特征个数.
pub const GLCM_FEATURE_COUNT: usize = 25;

/// CSV 输出文件名.
pub mod csv {
    /// 仅包含 3D 合并 GLCM 特征的独立输出文件.
    pub const GLCM_3D_MERGED: &str = "glcmFeatures3DWmrg.csv";

    /// 多个特征族共享的汇总输出文件 (以追加模式写入).
    pub const RADIOMICS_SHARED: &str = "radiomicsFeatures.csv";

    /// CSV 记录第一列的特征族名.
    pub const GROUP: &str = "glcmFeatures3DWmrg";
}
