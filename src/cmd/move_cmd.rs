//! 移动命令

use super::base::{CmdBase, ExistingPaths};
use super::evt::Command;
use crate::path::Pos;
use crate::sim::Sim;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 把选中单位从 `time_cmd` 起移向 `dest`。
///
/// 只选中路径上部分单位时，这些单位在 `time_cmd` 分离到一条新路径再移动。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCmdEvt {
    pub base: CmdBase,
    pub dest: Pos,
}

impl Command for MoveCmdEvt {
    fn base(&self) -> &CmdBase {
        &self.base
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim) {
        let t = self.base.time_cmd;
        for (id, units) in ex {
            match sim.move_units(id, t, &units, self.dest) {
                Some(moved) => debug!(path = %id, moved = %moved, dest = ?self.dest, "路径开始移动"),
                None => debug!(path = %id, "路径在锚定时间不可移动，跳过"),
            }
        }
    }
}
