//! 共生方向枚举.
//!
//! 方向由平面内角度 (0°, 45°, 90°, 135°, 180°) 与深度偏移 `{-1, 0, +1}`
//! 组合而成. 四个非零角度各自与三个深度偏移组合得到 12 个方向;
//! 角度 0 是纯深度方向的占位, 只与深度偏移 `+1` 组合.
//! 由于下游会对矩阵做对称化, 每个方向与其反方向等价,
//! 这 13 个方向恰好覆盖 26-邻域中所有互不等价的单位偏移.

use crate::consts::ANGLES;
use crate::Offset3d;

/// 一个 3D 共生方向: 平面内角度加深度偏移.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    angle: i32,
    direction_z: i32,
}

impl Direction {
    /// 构建方向.
    ///
    /// `angle` 必须是 `{0, 45, 90, 135, 180}` 之一, `direction_z`
    /// 必须在 `[-1, 1]` 内, 否则返回 `None`. 角度 0 的平面内偏移是零向量,
    /// 只允许与 `direction_z = +1` 组合, 其余组合没有意义.
    pub fn new(angle: i32, direction_z: i32) -> Option<Self> {
        let valid = ANGLES.contains(&angle)
            && (-1..=1).contains(&direction_z)
            && (angle != 0 || direction_z == 1);
        valid.then_some(Self { angle, direction_z })
    }

    /// 平面内角度 (度).
    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// 深度偏移.
    #[inline]
    pub fn direction_z(&self) -> i32 {
        self.direction_z
    }

    /// 该角度对应的平面内偏移 `(Δcol, Δ上方行数)`, 即参考坐标系下的
    /// (directionX, directionY): 邻居位于 `(row - dy, col + dx)`.
    ///
    /// 角度 0 的平面内偏移为零向量, 与 `direction_z = +1` 组合后
    /// 表示纯深度方向.
    #[inline]
    pub const fn xy_directions(&self) -> (isize, isize) {
        match self.angle {
            0 => (0, 0),
            45 => (1, 1),
            90 => (0, 1),
            135 => (-1, 1),
            180 => (1, 0),
            _ => unreachable!(),
        }
    }

    /// 邻居相对当前体素的实际位移 `(Δrow, Δcol, Δdepth)`.
    #[inline]
    pub const fn offsets(&self) -> Offset3d {
        let (dx, dy) = self.xy_directions();
        (-dy, dx, self.direction_z as isize)
    }
}

/// 按参考顺序枚举 3D 合并变体的全部 13 个方向.
///
/// 顺序为: 角度 `{180, 135, 90, 45}` 依次与深度偏移 `{-1, 0, +1}` 组合,
/// 最后是角度 0 与深度偏移 `+1` 的特殊组合. 下游平均对顺序不敏感.
pub fn merged_directions() -> impl Iterator<Item = Direction> {
    ANGLES.into_iter().flat_map(|angle| {
        let z_range = if angle > 0 { -1..=1 } else { 1..=1 };
        z_range.map(move |direction_z| Direction { angle, direction_z })
    })
}
