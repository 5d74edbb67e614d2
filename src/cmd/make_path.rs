//! 新建路径命令

use super::base::{CmdBase, ExistingPaths};
use super::evt::Command;
use crate::path::Pos;
use crate::sim::Sim;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 为命中的单位在 `time_cmd` 开出一条新路径并移向 `dest`。
///
/// 单位同时留在原路径上：同一单位可以出现在多条路径里。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakePathCmdEvt {
    pub base: CmdBase,
    pub dest: Pos,
}

impl Command for MakePathCmdEvt {
    fn base(&self) -> &CmdBase {
        &self.base
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim) {
        let t = self.base.time_cmd;
        for (id, units) in ex {
            let Some(src) = sim.path(id).filter(|p| p.can_move(t)) else {
                debug!(path = %id, "源路径在锚定时间不可移动，跳过");
                continue;
            };
            let (pos, speed) = (src.pos_at(t), src.speed);
            let new_id = sim.make_path(t, pos, speed, &units);
            sim.move_units(new_id, t, &units, self.dest);
            debug!(src = %id, path = %new_id, units = units.len(), "新建路径");
        }
    }
}
