//! 世界坐标
//!
//! 使用整数坐标，位置插值和行进时间全部是精确整数运算。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// 欧氏距离（向下取整的整数平方根），超出 `u64` 时取 `u64::MAX`。
    pub fn distance(self, other: Pos) -> u64 {
        let dx = u128::from(self.x.abs_diff(other.x));
        let dy = u128::from(self.y.abs_diff(other.y));
        let sq = dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy));
        u64::try_from(sq.isqrt()).unwrap_or(u64::MAX)
    }

    /// 在 `self` 与 `to` 之间按 `num / den` 线性插值。
    pub fn lerp(self, to: Pos, num: u64, den: u64) -> Pos {
        if den == 0 || num >= den {
            return to;
        }
        let step = |a: i64, b: i64| -> i64 {
            let d = i128::from(b) - i128::from(a);
            let v = i128::from(a) + d * i128::from(num) / i128::from(den);
            v as i64
        };
        Pos {
            x: step(self.x, to.x),
            y: step(self.y, to.y),
        }
    }
}
