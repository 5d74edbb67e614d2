//! 生产单位命令

use super::base::{CmdBase, ExistingPaths};
use super::evt::Command;
use crate::sim::Sim;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 在每条命中的路径上、`time_cmd` 时刻生产一个新单位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeUnitCmdEvt {
    pub base: CmdBase,
}

impl Command for MakeUnitCmdEvt {
    fn base(&self) -> &CmdBase {
        &self.base
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim) {
        let t = self.base.time_cmd;
        for (id, _) in ex {
            if let Some(unit) = sim.make_unit(t, id) {
                debug!(path = %id, unit = %unit, "生产单位");
            }
        }
    }
}
