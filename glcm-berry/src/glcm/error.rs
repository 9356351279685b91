//! 运行时错误.

/// GLCM 特征计算的运行时错误.
///
/// 只有结构性违规会成为错误; 数值上的退化情形 (如某方向没有任何有效邻居对)
/// 在内部以全零矩阵吸收, 不会向上传播.
#[derive(Debug, Clone, PartialEq)]
pub enum GlcmError {
    /// 灰度级个数 G 为 0, 无法构建共生矩阵.
    ZeroGreyLevels,

    /// 体素灰度值 (截断为整数后) 超出 `[1, G]`. 说明上游量化有 bug.
    ///
    /// 第一个参数是原始体素值, 第二个参数是允许的最大灰度级 G.
    InvalidGreyLevel(f32, usize),
}

/// GLCM 特征计算结果.
pub type GlcmResult<T> = Result<T, GlcmError>;
