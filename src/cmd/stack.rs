//! 堆叠命令与堆叠事件
//!
//! `StackCmdEvt` 把命中路径移向目标路径的最终落点，并为每条参与路径在其到达时间
//! 调度一个 `StackEvt`。每个 `StackEvt` 都携带完整的参与集合，谁先到谁就尝试堆叠；
//! 条件不再满足的尝试在触发时自然退化为空操作，不从队列中撤销。

use super::base::{CmdBase, ExistingPaths};
use super::evt::Command;
use crate::path::{PathId, UnitId};
use crate::sim::{Sim, SimTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// 堆叠目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackTarget {
    /// 堆叠到指定路径
    Path(PathId),
    /// 堆叠到所有命中路径的中心。预留编号，目前不产生任何移动。
    Centroid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackCmdEvt {
    pub base: CmdBase,
    pub stack_path: StackTarget,
}

impl Command for StackCmdEvt {
    fn base(&self) -> &CmdBase {
        &self.base
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim) {
        let t = self.base.time_cmd;
        let target = match self.stack_path {
            StackTarget::Path(id) => id,
            StackTarget::Centroid => {
                warn!(time_cmd = %t, "centroid 堆叠模式尚未定义，命令只记录历史");
                return;
            }
        };
        let Some(stack) = sim.path(target).filter(|p| p.exists_at(t)) else {
            debug!(stack_target = %target, "堆叠目标在锚定时间不存在");
            return;
        };
        let speed = stack.speed;
        let dest = stack.final_move().pos_end;

        let mut moved: Vec<PathId> = Vec::new();
        for (id, units) in ex {
            if id == target {
                continue;
            }
            let Some(path) = sim.path(id) else { continue };
            if path.speed != speed {
                debug!(path = %id, speed = path.speed, target_speed = speed, "速度不一致，跳过");
                continue;
            }
            match sim.move_units(id, t, &units, dest) {
                Some(moved_id) => moved.push(moved_id),
                None => debug!(path = %id, "路径在锚定时间不可移动，跳过"),
            }
        }

        if moved.is_empty() {
            debug!(stack_target = %target, "没有路径可以移动，堆叠命令为空操作");
            return;
        }
        if !moved.contains(&target) {
            moved.push(target);
        }
        moved.sort_unstable();

        for &id in &moved {
            let Some(at) = sim.path(id).map(|p| p.arrival_time()) else {
                continue;
            };
            sim.events.add(StackEvt {
                time: at,
                paths: moved.clone(),
            });
        }
        debug!(paths = ?moved, "已调度堆叠尝试");
    }
}

/// 系统派生事件：在某条参与路径到达时尝试把同一位置的路径合并。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEvt {
    pub time: SimTime,
    pub paths: Vec<PathId>,
}

impl StackEvt {
    /// 触发时重新校验每条路径：仍然存在、可被重定向、已经停下。
    /// 同一位置且同速度的路径合并到其中 id 最小的一条上，与命令的 `stack_path` 无关。
    #[tracing::instrument(skip_all, fields(time = %self.time, paths = self.paths.len()))]
    pub fn execute(self, sim: &mut Sim) {
        let t = self.time;
        let mut groups: BTreeMap<(i64, i64, u32), Vec<PathId>> = BTreeMap::new();
        for &id in &self.paths {
            let Some(path) = sim.path(id) else { continue };
            if !path.can_move(t) || path.is_moving_at(t) {
                continue;
            }
            let pos = path.pos_at(t);
            let group = groups.entry((pos.x, pos.y, path.speed)).or_default();
            if !group.contains(&id) {
                group.push(id);
            }
        }

        for (_, mut group) in groups {
            if group.len() < 2 {
                continue;
            }
            group.sort_unstable();
            let into = group[0];
            for &from in &group[1..] {
                let units: Vec<UnitId> = sim
                    .path(from)
                    .map(|p| p.units_at(t).to_vec())
                    .unwrap_or_default();
                sim.transfer_units(from, into, t, &units);
                info!(from = %from, into = %into, units = units.len(), "路径堆叠");
            }
        }
    }
}
