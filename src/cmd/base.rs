//! 命令公共部分
//!
//! 所有命令共享的信封：发出时间 `time`、锚定时间 `time_cmd`，以及目标选择
//! （路径 -> 该路径上被选中的单位）。

use crate::path::{PathId, UnitId};
use crate::sim::{Sim, SimTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 命令在锚定时间实际命中的 `(路径, 单位)`，按路径 id 排序。
pub type ExistingPaths = Vec<(PathId, Vec<UnitId>)>;

/// 命令的目标选择：路径 id 唯一，每条路径上的单位有序且无重复。
///
/// 反序列化时缺失或为 `null` 的单位列表规整为空列表，消费方不需要判空。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<PathId, Option<Vec<UnitId>>>")]
#[serde(into = "BTreeMap<PathId, Vec<UnitId>>")]
pub struct Selection(BTreeMap<PathId, Vec<UnitId>>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式构造
    pub fn with(mut self, path: PathId, units: impl IntoIterator<Item = UnitId>) -> Self {
        self.insert(path, units);
        self
    }

    /// 选中 `path` 上的 `units`；同一路径重复插入时合并。
    pub fn insert(&mut self, path: PathId, units: impl IntoIterator<Item = UnitId>) {
        let entry = self.0.entry(path).or_default();
        for u in units {
            if !entry.contains(&u) {
                entry.push(u);
            }
        }
    }

    /// 路径上被选中的单位；未选中的路径返回空切片。
    pub fn get(&self, path: PathId) -> &[UnitId] {
        self.0.get(&path).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PathId, &[UnitId])> {
        self.0.iter().map(|(p, u)| (*p, u.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<PathId, Option<Vec<UnitId>>>> for Selection {
    fn from(raw: BTreeMap<PathId, Option<Vec<UnitId>>>) -> Self {
        let mut sel = Selection::new();
        for (path, units) in raw {
            sel.insert(path, units.unwrap_or_default());
        }
        sel
    }
}

impl From<Selection> for BTreeMap<PathId, Vec<UnitId>> {
    fn from(sel: Selection) -> Self {
        sel.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmdBase {
    /// 发出命令时的时钟时间（队列排序键）
    pub time: SimTime,
    /// 命令效果锚定的时间，可以早于 `time`
    pub time_cmd: SimTime,
    #[serde(default)]
    pub paths: Selection,
}

impl CmdBase {
    pub fn new(time: SimTime, time_cmd: SimTime, paths: Selection) -> Self {
        Self {
            time,
            time_cmd,
            paths,
        }
    }

    /// 在 `time_cmd` 时刻实际存在且被选中的路径与单位。
    ///
    /// 路径在 `time_cmd` 没有段覆盖（尚未创建或不在路径表中）时直接略过；
    /// 选中单位与该时刻占用集的交集为空时也略过。结果只依赖 `(sim, time_cmd)`。
    pub fn existing_paths(&self, sim: &Sim) -> ExistingPaths {
        self.paths
            .iter()
            .filter_map(|(id, units)| {
                let seg = sim.path(id)?.segment_at(self.time_cmd)?;
                let matched: Vec<UnitId> =
                    units.iter().copied().filter(|&u| seg.contains(u)).collect();
                (!matched.is_empty()).then_some((id, matched))
            })
            .collect()
    }
}
