//! 共生矩阵构建: 邻居对提取, 计数累加, 对称化与归一化.

use ndarray::Array2;
use num::ToPrimitive;

use super::{Direction, GlcmError, GlcmResult};
use crate::data::GreyVolume;

/// 提取沿 `direction` 的全部有效邻居对 `(a, b)`.
///
/// 遍历每个邻居落在体数据范围内的体素; 只要两端点有一个位于 ROI 之外
/// (`NaN`), 该对就被跳过. 输出顺序是 `(row, col, depth)` 字典序,
/// 但下游只关心计数, 顺序没有语义.
///
/// 某轴厚度不足以容纳偏移时 (如单层体数据的深度方向),
/// 自然得到空序列, 不会越界读取.
pub(crate) fn neighbour_pairs(volume: &GreyVolume, direction: Direction) -> Vec<(f32, f32)> {
    let offsets = direction.offsets();
    let (rows, cols, depths) = volume.shape();
    let mut pairs = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            for depth in 0..depths {
                let a = volume[(row, col, depth)];
                if a.is_nan() {
                    continue;
                }
                let Some(npos) = volume.checked_neighbour((row, col, depth), offsets) else {
                    continue;
                };
                let b = volume[npos];
                if !b.is_nan() {
                    pairs.push((a, b));
                }
            }
        }
    }
    pairs
}

/// 将体素灰度值转换为矩阵下标 (0 起始).
///
/// 灰度级是 1 起始的整数; 小数部分按整型转换规则截断.
/// 截断后超出 `[1, levels]` 视为上游量化错误, 快速失败.
#[inline]
fn grey_index(value: f32, levels: usize) -> GlcmResult<usize> {
    value
        .to_usize()
        .filter(|g| (1..=levels).contains(g))
        .map(|g| g - 1)
        .ok_or(GlcmError::InvalidGreyLevel(value, levels))
}

/// 将邻居对累加为 `levels × levels` 共生计数矩阵.
///
/// 单元 `(i, j)` 统计灰度对 `(i + 1, j + 1)` 的出现次数.
/// 纯累加操作, 对邻居对的顺序不敏感.
pub(crate) fn fill_cooccurrence(pairs: &[(f32, f32)], levels: usize) -> GlcmResult<Array2<f64>> {
    if levels == 0 {
        return Err(GlcmError::ZeroGreyLevels);
    }

    let mut matrix = Array2::zeros((levels, levels));
    for &(a, b) in pairs {
        let (i, j) = (grey_index(a, levels)?, grey_index(b, levels)?);
        matrix[[i, j]] += 1.0;
    }
    Ok(matrix)
}

/// 对称化计数矩阵并归一化为联合概率矩阵.
///
/// 先与转置逐元素相加 (使方向与其反方向等价), 再除以全部元素之和,
/// 使矩阵总和为 1. 若计数总和为 0 (该方向没有任何有效邻居对),
/// 返回全零矩阵而不是除零 —— 这是可接受的退化状态, 不是错误.
pub(crate) fn symmetric_probabilities(matrix: &Array2<f64>) -> Array2<f64> {
    let sym = matrix + &matrix.t();
    let total = sym.sum();
    if total == 0.0 {
        sym
    } else {
        sym / total
    }
}

#[cfg(test)]
mod tests {
    use super::{fill_cooccurrence, grey_index, neighbour_pairs, symmetric_probabilities};
    use crate::glcm::{Direction, GlcmError};
    use crate::GreyVolume;
    use ndarray::array;

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_pair_counts() {
        let v = GreyVolume::filled((2, 2, 2), 1.0);

        // 沿列方向: 每行每层各一对.
        let along_col = Direction::new(180, 0).unwrap();
        assert_eq!(neighbour_pairs(&v, along_col).len(), 4);

        // 平面对角线: 只有 row >= 1 且 col == 0 的体素有邻居.
        let diagonal = Direction::new(45, 0).unwrap();
        assert_eq!(neighbour_pairs(&v, diagonal).len(), 2);

        // 纯深度方向.
        let depth = Direction::new(0, 1).unwrap();
        assert_eq!(neighbour_pairs(&v, depth).len(), 4);
    }

    /// ROI 之外 (NaN) 的端点会使整个邻居对被跳过.
    #[test]
    fn test_pairs_skip_nan() {
        let v = GreyVolume::from_shape_vec((1, 3, 1), vec![1.0, f32::NAN, 2.0]).unwrap();
        let along_col = Direction::new(180, 0).unwrap();
        assert!(neighbour_pairs(&v, along_col).is_empty());

        let v = GreyVolume::from_shape_vec((1, 3, 1), vec![1.0, 2.0, f32::NAN]).unwrap();
        assert_eq!(neighbour_pairs(&v, along_col), vec![(1.0, 2.0)]);
    }

    /// 轴厚度为 1 时, 需要该轴偏移的方向得到空序列.
    #[test]
    fn test_thin_axis_empty() {
        let v = GreyVolume::filled((3, 3, 1), 1.0);
        for dz in [-1, 1] {
            let d = Direction::new(90, dz).unwrap();
            assert!(neighbour_pairs(&v, d).is_empty());
        }
        assert!(neighbour_pairs(&v, Direction::new(0, 1).unwrap()).is_empty());
    }

    #[test]
    fn test_grey_index() {
        assert_eq!(grey_index(1.0, 4), Ok(0));
        assert_eq!(grey_index(4.0, 4), Ok(3));
        // 小数截断
        assert_eq!(grey_index(2.7, 4), Ok(1));
        assert_eq!(grey_index(0.5, 4), Err(GlcmError::InvalidGreyLevel(0.5, 4)));
        assert_eq!(grey_index(5.0, 4), Err(GlcmError::InvalidGreyLevel(5.0, 4)));
        assert_eq!(grey_index(-1.0, 4), Err(GlcmError::InvalidGreyLevel(-1.0, 4)));
    }

    #[test]
    fn test_fill_cooccurrence() {
        let pairs = [(1.0, 2.0), (2.0, 1.0), (1.0, 2.0), (2.0, 2.0)];
        let m = fill_cooccurrence(&pairs, 2).unwrap();
        assert_eq!(m, array![[0.0, 2.0], [1.0, 1.0]]);

        assert_eq!(
            fill_cooccurrence(&[(3.0, 1.0)], 2),
            Err(GlcmError::InvalidGreyLevel(3.0, 2))
        );
        assert_eq!(fill_cooccurrence(&[], 0), Err(GlcmError::ZeroGreyLevels));
    }

    /// 累加满足交换律: 打乱邻居对顺序不改变矩阵.
    #[test]
    fn test_fill_permutation_invariant() {
        let mut pairs = vec![(1.0, 2.0), (2.0, 3.0), (3.0, 3.0), (1.0, 1.0), (2.0, 1.0)];
        let m1 = fill_cooccurrence(&pairs, 3).unwrap();
        pairs.reverse();
        let m2 = fill_cooccurrence(&pairs, 3).unwrap();
        pairs.swap(0, 2);
        let m3 = fill_cooccurrence(&pairs, 3).unwrap();
        assert_eq!(m1, m2);
        assert_eq!(m1, m3);
    }

    /// 对称化后矩阵对称, 且总和为 1.
    #[test]
    fn test_symmetric_probabilities() {
        let m = array![[0.0, 2.0], [1.0, 1.0]];
        let p = symmetric_probabilities(&m);

        assert!(f64_eq(p.sum(), 1.0));
        for i in 0..2 {
            for j in 0..2 {
                assert!(f64_eq(p[[i, j]], p[[j, i]]));
            }
        }
        assert!(f64_eq(p[[0, 1]], 3.0 / 8.0));
        assert!(f64_eq(p[[1, 1]], 2.0 / 8.0));
    }

    /// 退化方向: 计数全零时不会除零, 结果保持全零.
    #[test]
    fn test_symmetric_degenerate() {
        let m = ndarray::Array2::zeros((3, 3));
        let p = symmetric_probabilities(&m);
        assert!(p.iter().all(|&v| v == 0.0));
    }
}
