//! 删除其他路径命令

use super::base::{CmdBase, ExistingPaths};
use super::evt::Command;
use crate::path::PathId;
use crate::sim::Sim;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 让命中单位在 `time_cmd` 起只留在被选中的路径上，从其他所有路径移出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOtherPathsCmdEvt {
    pub base: CmdBase,
}

impl Command for DeleteOtherPathsCmdEvt {
    fn base(&self) -> &CmdBase {
        &self.base
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim) {
        let t = self.base.time_cmd;
        let keep: Vec<PathId> = ex.iter().map(|(id, _)| *id).collect();
        for (_, units) in &ex {
            for &u in units {
                for other in sim.paths_with_unit(u, t) {
                    if keep.contains(&other) {
                        continue;
                    }
                    sim.remove_units(other, t, &[u]);
                    debug!(path = %other, unit = %u, "从其他路径移出单位");
                }
            }
        }
    }
}
