//! 从单个联合概率矩阵计算 25 个纹理统计量.

use std::ops::{AddAssign, Div};

use itertools::iproduct;
use ndarray::{Array1, Array2, Axis};
use ordered_float::OrderedFloat;

use crate::consts::GLCM_FEATURE_COUNT;

/// 特征名称, 顺序与 [`FeatureVector::values`] 一一对应.
/// 该顺序同时也是 CSV 输出的行顺序.
pub const FEATURE_LABELS: [&str; GLCM_FEATURE_COUNT] = [
    "joint maximum",
    "joint average",
    "joint variance",
    "joint entropy",
    "difference average",
    "difference variance",
    "difference entropy",
    "sum average",
    "sum variance",
    "sum entropy",
    "angular second moment",
    "contrast",
    "dissimilarity",
    "inverse difference",
    "inverse difference normalised",
    "inverse difference moment",
    "inverse difference moment normalised",
    "inverse variance",
    "correlation",
    "autocorrelation",
    "cluster tendency",
    "cluster shade",
    "cluster prominence",
    "first measure of information correlation",
    "second measure of information correlation",
];

/// 3D 合并 GLCM 的 25 个标量纹理特征.
///
/// 该结构完全透明. 每个字段都是概率矩阵的确定性归约,
/// 经过方向平均后即为最终发布值.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector {
    /// 最大联合概率.
    pub joint_maximum: f64,
    /// 第一下标的期望: `Σ i·p(i,j)`.
    pub joint_average: f64,
    /// 第一下标围绕 joint average 的方差.
    pub joint_variance: f64,
    /// 联合熵: `-Σ p·log2(p)`.
    pub joint_entropy: f64,
    /// 差分布 `|i-j|` 的均值.
    pub diff_average: f64,
    /// 差分布的方差.
    pub diff_variance: f64,
    /// 差分布的熵.
    pub diff_entropy: f64,
    /// 和分布 `i+j` 的均值.
    pub sum_average: f64,
    /// 和分布的方差.
    pub sum_variance: f64,
    /// 和分布的熵.
    pub sum_entropy: f64,
    /// 角二阶矩 (能量): `Σ p²`.
    pub ang_sec_moment: f64,
    /// 对比度: `Σ (i-j)²·p`.
    pub contrast: f64,
    /// 相异度: `Σ |i-j|·p`.
    pub dissimilarity: f64,
    /// 逆差: `Σ p/(1+|i-j|)`.
    pub inverse_diff: f64,
    /// 按矩阵边长归一化的逆差.
    pub inverse_diff_norm: f64,
    /// 逆差矩: `Σ p/(1+(i-j)²)`.
    pub inverse_diff_mom: f64,
    /// 按矩阵边长平方归一化的逆差矩.
    pub inverse_diff_mom_norm: f64,
    /// 逆方差: `Σ p/(i-j)²`, 只统计 `i ≠ j` 的项.
    pub inverse_var: f64,
    /// 灰度级的线性相关系数.
    pub correlation: f64,
    /// 自相关: `Σ i·j·p`.
    pub auto_correlation: f64,
    /// 聚类趋势: `(i+j-2μ)` 的二阶矩.
    pub cluster_tendency: f64,
    /// 聚类阴影: `(i+j-2μ)` 的三阶矩.
    pub cluster_shade: f64,
    /// 聚类显著性: `(i+j-2μ)` 的四阶矩.
    pub cluster_prominence: f64,
    /// 第一信息相关性度量: `(HXY - HXY1) / HX`.
    pub first_m_correlation: f64,
    /// 第二信息相关性度量: `sqrt(1 - exp(-2(HXY2 - HXY)))`.
    pub second_m_correlation: f64,
}

/// `0 * log2(0)` 按极限值 0 处理.
#[inline]
fn entropy_term(p: f64) -> f64 {
    if p > 0.0 {
        -p * p.log2()
    } else {
        0.0
    }
}

/// 对分布 `dist` (取值为 `value_of(下标)`) 计算均值, 方差和熵.
fn distribution_stats(dist: &Array1<f64>, value_of: impl Fn(usize) -> f64) -> (f64, f64, f64) {
    let mean: f64 = dist
        .iter()
        .enumerate()
        .map(|(k, &m)| value_of(k) * m)
        .sum();
    let variance = dist
        .iter()
        .enumerate()
        .map(|(k, &m)| (value_of(k) - mean).powi(2) * m)
        .sum();
    let entropy = dist.iter().map(|&m| entropy_term(m)).sum();
    (mean, variance, entropy)
}

impl FeatureVector {
    /// 由一个对称且总和为 1 (或全零, 退化情形) 的联合概率矩阵计算全部特征.
    ///
    /// 灰度值按 1 起始换算, 即矩阵下标 `(i, j)` 对应灰度对 `(i+1, j+1)`.
    /// 全零矩阵得到全零特征向量; 所有 `log(0)` 与除零均按极限值 0 处理.
    pub fn from_probabilities(p: &Array2<f64>) -> Self {
        let g = p.nrows();
        debug_assert_eq!(g, p.ncols());
        if g == 0 {
            return Self::default();
        }
        let gf = g as f64;

        // 行边缘分布. 矩阵对称, 因此与列边缘分布相同.
        let marginal = p.sum_axis(Axis(1));
        let mu: f64 = marginal
            .iter()
            .enumerate()
            .map(|(i, &m)| (i + 1) as f64 * m)
            .sum();
        let sigma2: f64 = marginal
            .iter()
            .enumerate()
            .map(|(i, &m)| ((i + 1) as f64 - mu).powi(2) * m)
            .sum();

        // 差分布 (下标 = |i-j|) 与和分布 (下标 = i+j, 对应灰度和 i+j+2).
        let mut diagonal = Array1::<f64>::zeros(g);
        let mut cross = Array1::<f64>::zeros(2 * g - 1);
        for ((i, j), &v) in p.indexed_iter() {
            diagonal[i.abs_diff(j)] += v;
            cross[i + j] += v;
        }

        let joint_maximum = p
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map_or(0.0, OrderedFloat::into_inner);

        // 一次遍历完成所有只依赖单元值与下标的归约.
        let mut joint_average = 0.0;
        let mut joint_entropy = 0.0;
        let mut ang_sec_moment = 0.0;
        let mut contrast = 0.0;
        let mut dissimilarity = 0.0;
        let mut inverse_diff = 0.0;
        let mut inverse_diff_norm = 0.0;
        let mut inverse_diff_mom = 0.0;
        let mut inverse_diff_mom_norm = 0.0;
        let mut inverse_var = 0.0;
        let mut auto_correlation = 0.0;
        for ((i, j), &v) in p.indexed_iter() {
            let (li, lj) = ((i + 1) as f64, (j + 1) as f64);
            let diff = li - lj;

            joint_average += li * v;
            joint_entropy += entropy_term(v);
            ang_sec_moment += v * v;
            contrast += diff * diff * v;
            dissimilarity += diff.abs() * v;
            inverse_diff += v / (1.0 + diff.abs());
            inverse_diff_norm += v / (1.0 + diff.abs() / gf);
            inverse_diff_mom += v / (1.0 + diff * diff);
            inverse_diff_mom_norm += v / (1.0 + diff * diff / (gf * gf));
            if i != j {
                inverse_var += v / (diff * diff);
            }
            auto_correlation += li * lj * v;
        }

        // 第二次遍历: 依赖联合均值 / 边缘均值的中心矩.
        let mut joint_variance = 0.0;
        let mut correlation = 0.0;
        let mut cluster_tendency = 0.0;
        let mut cluster_shade = 0.0;
        let mut cluster_prominence = 0.0;
        for ((i, j), &v) in p.indexed_iter() {
            let (li, lj) = ((i + 1) as f64, (j + 1) as f64);

            joint_variance += (li - joint_average).powi(2) * v;
            correlation += (li - mu) * (lj - mu) * v;
            let s = li + lj - 2.0 * mu;
            cluster_tendency += s * s * v;
            cluster_shade += s.powi(3) * v;
            cluster_prominence += s.powi(4) * v;
        }
        // 边缘方差为零 (单一灰度级或退化矩阵) 时相关系数无定义, 取 0.
        correlation = if sigma2 > 0.0 {
            correlation / sigma2
        } else {
            0.0
        };

        let (diff_average, diff_variance, diff_entropy) =
            distribution_stats(&diagonal, |k| k as f64);
        let (sum_average, sum_variance, sum_entropy) =
            distribution_stats(&cross, |k| (k + 2) as f64);

        // 两个信息相关性度量: HX 是边缘熵, HXY 是联合熵,
        // HXY1 / HXY2 是联合分布与边缘乘积分布之间的交叉熵量.
        let hx: f64 = marginal.iter().map(|&m| entropy_term(m)).sum();
        let mut hxy1 = 0.0;
        let mut hxy2 = 0.0;
        for (i, j) in iproduct!(0..g, 0..g) {
            let mm = marginal[i] * marginal[j];
            if mm > 0.0 {
                hxy1 -= p[[i, j]] * mm.log2();
                hxy2 -= mm * mm.log2();
            }
        }
        let first_m_correlation = if hx > 0.0 {
            (joint_entropy - hxy1) / hx
        } else {
            0.0
        };
        let squared = 1.0 - (-2.0 * (hxy2 - joint_entropy)).exp();
        let second_m_correlation = if squared > 0.0 { squared.sqrt() } else { 0.0 };

        Self {
            joint_maximum,
            joint_average,
            joint_variance,
            joint_entropy,
            diff_average,
            diff_variance,
            diff_entropy,
            sum_average,
            sum_variance,
            sum_entropy,
            ang_sec_moment,
            contrast,
            dissimilarity,
            inverse_diff,
            inverse_diff_norm,
            inverse_diff_mom,
            inverse_diff_mom_norm,
            inverse_var,
            correlation,
            auto_correlation,
            cluster_tendency,
            cluster_shade,
            cluster_prominence,
            first_m_correlation,
            second_m_correlation,
        }
    }

    /// 按 [`FEATURE_LABELS`] 的顺序取出全部特征值.
    pub fn values(&self) -> [f64; GLCM_FEATURE_COUNT] {
        [
            self.joint_maximum,
            self.joint_average,
            self.joint_variance,
            self.joint_entropy,
            self.diff_average,
            self.diff_variance,
            self.diff_entropy,
            self.sum_average,
            self.sum_variance,
            self.sum_entropy,
            self.ang_sec_moment,
            self.contrast,
            self.dissimilarity,
            self.inverse_diff,
            self.inverse_diff_norm,
            self.inverse_diff_mom,
            self.inverse_diff_mom_norm,
            self.inverse_var,
            self.correlation,
            self.auto_correlation,
            self.cluster_tendency,
            self.cluster_shade,
            self.cluster_prominence,
            self.first_m_correlation,
            self.second_m_correlation,
        ]
    }

    /// 由 [`FEATURE_LABELS`] 顺序的数组构建特征向量.
    pub fn from_values(v: [f64; GLCM_FEATURE_COUNT]) -> Self {
        Self {
            joint_maximum: v[0],
            joint_average: v[1],
            joint_variance: v[2],
            joint_entropy: v[3],
            diff_average: v[4],
            diff_variance: v[5],
            diff_entropy: v[6],
            sum_average: v[7],
            sum_variance: v[8],
            sum_entropy: v[9],
            ang_sec_moment: v[10],
            contrast: v[11],
            dissimilarity: v[12],
            inverse_diff: v[13],
            inverse_diff_norm: v[14],
            inverse_diff_mom: v[15],
            inverse_diff_mom_norm: v[16],
            inverse_var: v[17],
            correlation: v[18],
            auto_correlation: v[19],
            cluster_tendency: v[20],
            cluster_shade: v[21],
            cluster_prominence: v[22],
            first_m_correlation: v[23],
            second_m_correlation: v[24],
        }
    }

    /// 按 CSV 输出顺序迭代 `(特征名, 特征值)`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_LABELS.into_iter().zip(self.values())
    }
}

/// 方向平均所需的逐元素累加.
impl AddAssign<&FeatureVector> for FeatureVector {
    fn add_assign(&mut self, rhs: &FeatureVector) {
        let mut sum = self.values();
        for (acc, v) in sum.iter_mut().zip(rhs.values()) {
            *acc += v;
        }
        *self = Self::from_values(sum);
    }
}

/// 方向平均所需的逐元素缩放.
impl Div<f64> for FeatureVector {
    type Output = FeatureVector;

    fn div(self, rhs: f64) -> FeatureVector {
        FeatureVector::from_values(self.values().map(|v| v / rhs))
    }
}
