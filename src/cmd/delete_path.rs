//! 删除路径命令

use super::base::{CmdBase, ExistingPaths};
use super::evt::Command;
use crate::path::UnitId;
use crate::sim::Sim;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 从 `time_cmd` 起把命中单位移出路径。
///
/// 单位在该时刻没有其他路径时保留，单位不会因此失去所有路径。
/// 路径被清空后留下空的终止段，不会从路径表中消失。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePathCmdEvt {
    pub base: CmdBase,
}

impl Command for DeletePathCmdEvt {
    fn base(&self) -> &CmdBase {
        &self.base
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim) {
        let t = self.base.time_cmd;
        for (id, units) in ex {
            let removable: Vec<UnitId> = units
                .into_iter()
                .filter(|&u| sim.paths_with_unit(u, t).iter().any(|&p| p != id))
                .collect();
            if removable.is_empty() {
                debug!(path = %id, "单位没有其他路径，保留");
                continue;
            }
            sim.remove_units(id, t, &removable);
            debug!(path = %id, removed = removable.len(), "移出单位");
        }
    }
}
