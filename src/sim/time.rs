//! 仿真时间类型
//!
//! 定义仿真时间及其单位转换。命令可以携带早于当前时钟的锚定时间，
//! 因此所有推导出的时刻都用整数毫秒表示，保证回放逐字节一致。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 仿真时间（毫秒）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const MAX: SimTime = SimTime(u64::MAX);

    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms)
    }
    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s.saturating_mul(1_000))
    }

    /// 向后推进 `ms` 毫秒（饱和）。
    pub fn saturating_add(self, ms: u64) -> SimTime {
        SimTime(self.0.saturating_add(ms))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
