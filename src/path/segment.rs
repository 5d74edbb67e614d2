//! 占用段
//!
//! 一段 `[time_start, 下一段的 time_start)` 内，路径上的单位集合固定不变。

use super::id::UnitId;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub time_start: SimTime,
    /// 有序、无重复
    pub units: Vec<UnitId>,
}

impl Segment {
    pub fn new(time_start: SimTime, units: &[UnitId]) -> Self {
        let mut seg = Segment {
            time_start,
            units: Vec::with_capacity(units.len()),
        };
        seg.insert_units(units);
        seg
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.units.binary_search(&unit).is_ok()
    }

    pub(crate) fn insert_units(&mut self, units: &[UnitId]) {
        for &u in units {
            if let Err(idx) = self.units.binary_search(&u) {
                self.units.insert(idx, u);
            }
        }
    }

    pub(crate) fn remove_units(&mut self, units: &[UnitId]) {
        self.units.retain(|u| !units.contains(u));
    }
}
