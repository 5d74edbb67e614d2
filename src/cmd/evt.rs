//! 事件层级
//!
//! 命令集合是封闭的：每新增一种命令就是 `CmdEvt` 的一个新分支和一个新的
//! `EvtTag`，已经分配的编号永不复用。

use super::base::{CmdBase, ExistingPaths};
use super::delete_other_paths::DeleteOtherPathsCmdEvt;
use super::delete_path::DeletePathCmdEvt;
use super::make_path::MakePathCmdEvt;
use super::make_unit::MakeUnitCmdEvt;
use super::move_cmd::MoveCmdEvt;
use super::stack::{StackCmdEvt, StackEvt};
use crate::sim::{Sim, SimTime};
use tracing::{debug, trace};

/// 序列化流中区分事件类型的稳定编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EvtTag {
    Move = 1,
    MakeUnit = 2,
    MakePath = 3,
    DeletePath = 4,
    DeleteOtherPaths = 5,
    Stack = 6,
    StackEvt = 7,
}

impl TryFrom<u8> for EvtTag {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, u8> {
        Ok(match raw {
            1 => EvtTag::Move,
            2 => EvtTag::MakeUnit,
            3 => EvtTag::MakePath,
            4 => EvtTag::DeletePath,
            5 => EvtTag::DeleteOtherPaths,
            6 => EvtTag::Stack,
            7 => EvtTag::StackEvt,
            other => return Err(other),
        })
    }
}

/// 具体命令：只需给出公共信封和自己的效果。
///
/// 记录历史、计算 `existing_paths` 由 [`CmdEvt::execute`] 统一完成，
/// `apply` 拿到的是锚定时间的命中视图。
pub trait Command: Clone + Into<CmdEvt> {
    fn base(&self) -> &CmdBase;

    fn existing_paths(&self, sim: &Sim) -> ExistingPaths {
        self.base().existing_paths(sim)
    }

    fn apply(&self, ex: ExistingPaths, sim: &mut Sim);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdEvt {
    Move(MoveCmdEvt),
    MakeUnit(MakeUnitCmdEvt),
    MakePath(MakePathCmdEvt),
    DeletePath(DeletePathCmdEvt),
    DeleteOtherPaths(DeleteOtherPathsCmdEvt),
    Stack(StackCmdEvt),
}

impl CmdEvt {
    pub fn base(&self) -> &CmdBase {
        match self {
            CmdEvt::Move(c) => c.base(),
            CmdEvt::MakeUnit(c) => c.base(),
            CmdEvt::MakePath(c) => c.base(),
            CmdEvt::DeletePath(c) => c.base(),
            CmdEvt::DeleteOtherPaths(c) => c.base(),
            CmdEvt::Stack(c) => c.base(),
        }
    }

    pub fn time(&self) -> SimTime {
        self.base().time
    }

    pub fn tag(&self) -> EvtTag {
        match self {
            CmdEvt::Move(_) => EvtTag::Move,
            CmdEvt::MakeUnit(_) => EvtTag::MakeUnit,
            CmdEvt::MakePath(_) => EvtTag::MakePath,
            CmdEvt::DeletePath(_) => EvtTag::DeletePath,
            CmdEvt::DeleteOtherPaths(_) => EvtTag::DeleteOtherPaths,
            CmdEvt::Stack(_) => EvtTag::Stack,
        }
    }

    pub fn existing_paths(&self, sim: &Sim) -> ExistingPaths {
        self.base().existing_paths(sim)
    }

    /// 执行命令：先取锚定时间视图，再写入命令历史，最后运行具体效果。
    pub fn execute(self, sim: &mut Sim) {
        match self {
            CmdEvt::Move(c) => run_command(c, sim),
            CmdEvt::MakeUnit(c) => run_command(c, sim),
            CmdEvt::MakePath(c) => run_command(c, sim),
            CmdEvt::DeletePath(c) => run_command(c, sim),
            CmdEvt::DeleteOtherPaths(c) => run_command(c, sim),
            CmdEvt::Stack(c) => run_command(c, sim),
        }
    }
}

#[tracing::instrument(skip_all, fields(kind = std::any::type_name::<C>(), time = %cmd.base().time, time_cmd = %cmd.base().time_cmd))]
fn run_command<C: Command>(cmd: C, sim: &mut Sim) {
    let ex = cmd.existing_paths(sim);
    debug!(targets = cmd.base().paths.len(), existing = ex.len(), "命令执行");
    sim.record_cmd(cmd.clone().into());
    cmd.apply(ex, sim);
    trace!("命令执行完成");
}

/// 队列中的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvt {
    Cmd(CmdEvt),
    Stack(StackEvt),
}

impl SimEvt {
    pub fn time(&self) -> SimTime {
        match self {
            SimEvt::Cmd(c) => c.time(),
            SimEvt::Stack(e) => e.time,
        }
    }

    pub fn tag(&self) -> EvtTag {
        match self {
            SimEvt::Cmd(c) => c.tag(),
            SimEvt::Stack(_) => EvtTag::StackEvt,
        }
    }

    /// 日志用名称
    pub fn name(&self) -> &'static str {
        match self.tag() {
            EvtTag::Move => "move",
            EvtTag::MakeUnit => "make_unit",
            EvtTag::MakePath => "make_path",
            EvtTag::DeletePath => "delete_path",
            EvtTag::DeleteOtherPaths => "delete_other_paths",
            EvtTag::Stack => "stack_cmd",
            EvtTag::StackEvt => "stack",
        }
    }

    pub fn execute(self, sim: &mut Sim) {
        match self {
            SimEvt::Cmd(c) => c.execute(sim),
            SimEvt::Stack(e) => e.execute(sim),
        }
    }
}

impl From<CmdEvt> for SimEvt {
    fn from(c: CmdEvt) -> Self {
        SimEvt::Cmd(c)
    }
}

impl From<StackEvt> for SimEvt {
    fn from(e: StackEvt) -> Self {
        SimEvt::Stack(e)
    }
}

impl From<MoveCmdEvt> for CmdEvt {
    fn from(c: MoveCmdEvt) -> Self {
        CmdEvt::Move(c)
    }
}

impl From<MakeUnitCmdEvt> for CmdEvt {
    fn from(c: MakeUnitCmdEvt) -> Self {
        CmdEvt::MakeUnit(c)
    }
}

impl From<MakePathCmdEvt> for CmdEvt {
    fn from(c: MakePathCmdEvt) -> Self {
        CmdEvt::MakePath(c)
    }
}

impl From<DeletePathCmdEvt> for CmdEvt {
    fn from(c: DeletePathCmdEvt) -> Self {
        CmdEvt::DeletePath(c)
    }
}

impl From<DeleteOtherPathsCmdEvt> for CmdEvt {
    fn from(c: DeleteOtherPathsCmdEvt) -> Self {
        CmdEvt::DeleteOtherPaths(c)
    }
}

impl From<StackCmdEvt> for CmdEvt {
    fn from(c: StackCmdEvt) -> Self {
        CmdEvt::Stack(c)
    }
}

impl From<MoveCmdEvt> for SimEvt {
    fn from(c: MoveCmdEvt) -> Self {
        SimEvt::Cmd(c.into())
    }
}

impl From<MakeUnitCmdEvt> for SimEvt {
    fn from(c: MakeUnitCmdEvt) -> Self {
        SimEvt::Cmd(c.into())
    }
}

impl From<MakePathCmdEvt> for SimEvt {
    fn from(c: MakePathCmdEvt) -> Self {
        SimEvt::Cmd(c.into())
    }
}

impl From<DeletePathCmdEvt> for SimEvt {
    fn from(c: DeletePathCmdEvt) -> Self {
        SimEvt::Cmd(c.into())
    }
}

impl From<DeleteOtherPathsCmdEvt> for SimEvt {
    fn from(c: DeleteOtherPathsCmdEvt) -> Self {
        SimEvt::Cmd(c.into())
    }
}

impl From<StackCmdEvt> for SimEvt {
    fn from(c: StackCmdEvt) -> Self {
        SimEvt::Cmd(c.into())
    }
}
