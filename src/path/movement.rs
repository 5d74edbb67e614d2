//! 移动
//!
//! 一次计划中的平移：从 `time_start` 的 `pos_start` 匀速到 `time_end` 的 `pos_end`。

use super::pos::Pos;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub time_start: SimTime,
    pub time_end: SimTime,
    pub pos_start: Pos,
    pub pos_end: Pos,
}

impl Move {
    /// 原地不动的移动（路径创建时使用）
    pub fn stationary(time: SimTime, pos: Pos) -> Self {
        Self {
            time_start: time,
            time_end: time,
            pos_start: pos,
            pos_end: pos,
        }
    }

    /// 以 `speed`（单位/秒）从 `from` 出发前往 `to`。
    pub fn toward(time: SimTime, from: Pos, to: Pos, speed: u32) -> Self {
        let dist = from.distance(to);
        let travel_ms = if speed == 0 {
            u64::MAX
        } else {
            let num = u128::from(dist) * 1_000;
            let den = u128::from(speed);
            u64::try_from(num.div_ceil(den)).unwrap_or(u64::MAX)
        };
        Self {
            time_start: time,
            time_end: time.saturating_add(travel_ms),
            pos_start: from,
            pos_end: to,
        }
    }

    /// `t` 时刻的位置（移动开始前取起点，结束后取终点）
    pub fn pos_at(&self, t: SimTime) -> Pos {
        if t <= self.time_start {
            return self.pos_start;
        }
        if t >= self.time_end {
            return self.pos_end;
        }
        let num = t.0 - self.time_start.0;
        let den = self.time_end.0 - self.time_start.0;
        self.pos_start.lerp(self.pos_end, num, den)
    }
}
