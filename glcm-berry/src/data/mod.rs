use std::ops::Index;

use ndarray::Array3;
use num::ToPrimitive;

use crate::{Idx3d, Offset3d};

/// 量化后的 3D 灰度体数据.
///
/// 体素值为整数灰度级 (从 1 开始计数, 以 `f32` 保存), ROI 之外的体素以
/// `NaN` 标记. 按 `(row, col, depth)` 顺序索引. 该结构是只读的:
/// 一次计算过程中形状与内容均不变.
#[derive(Debug, Clone)]
pub struct GreyVolume {
    data: Array3<f32>,
}

impl GreyVolume {
    /// 由现成的 `ndarray` 三维数组构建体数据.
    #[inline]
    pub fn from_array(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// 由形状和行优先存储的数据构建体数据.
    ///
    /// 若 `data` 长度与形状不匹配则返回 `None`.
    pub fn from_shape_vec((r, c, d): Idx3d, data: Vec<f32>) -> Option<Self> {
        Array3::from_shape_vec((r, c, d), data)
            .ok()
            .map(Self::from_array)
    }

    /// 构建以 `value` 填满的体数据. 主要用于测试与演示.
    #[inline]
    pub fn filled((r, c, d): Idx3d, value: f32) -> Self {
        Self::from_array(Array3::from_elem((r, c, d), value))
    }

    /// 获取数据形状大小, 按 `(row, col, depth)` 顺序.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        let &[r, c, d] = self.data.shape() else {
            unreachable!("Array3 形状必是三元组");
        };
        (r, c, d)
    }

    /// 获取数据体素个数.
    #[inline]
    pub fn size(&self) -> usize {
        let (r, c, d) = self.shape();
        r * c * d
    }

    /// 检查索引是否合法.
    #[inline]
    pub fn check(&self, (r0, c0, d0): &Idx3d) -> bool {
        let (r, c, d) = self.shape();
        *r0 < r && *c0 < c && *d0 < d
    }

    /// 获取某体素的值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx3d) -> Option<f32> {
        self.data.get(pos).copied()
    }

    /// 该体素是否位于 ROI 之内 (即非 `NaN`)? 越界时返回 `false`.
    #[inline]
    pub fn is_roi(&self, pos: Idx3d) -> bool {
        self.get(pos).is_some_and(|v| !v.is_nan())
    }

    /// 求 `pos` 沿 `offset` 的邻居索引. 结果越界时返回 `None`.
    #[inline]
    pub fn checked_neighbour(&self, (r, c, d): Idx3d, (dr, dc, dd): Offset3d) -> Option<Idx3d> {
        let pos = (
            r.checked_add_signed(dr)?,
            c.checked_add_signed(dc)?,
            d.checked_add_signed(dd)?,
        );
        self.check(&pos).then_some(pos)
    }

    /// 从数据推导最大灰度级 G: 全体有限体素的最大值 (截断为整数).
    ///
    /// 正常情况下 G 应由上游量化阶段直接提供, 此方法仅是兜底.
    /// 若 ROI 为空或最大值小于 1, 返回 `None`.
    pub fn max_grey_level(&self) -> Option<usize> {
        self.data
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f32>, &v| {
                Some(acc.map_or(v, |a| a.max(v)))
            })
            .and_then(|v| v.to_usize())
            .filter(|&g| g >= 1)
    }

    /// 获取底层数组的引用.
    #[inline]
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }
}

impl Index<Idx3d> for GreyVolume {
    type Output = f32;

    #[inline]
    fn index(&self, pos: Idx3d) -> &f32 {
        &self.data[pos]
    }
}
