//! 事件与命令
//!
//! `SimEvt` 是队列里的所有事件；`CmdEvt` 是外部生产者（输入层、网络层）构造的命令，
//! 其余是系统在执行过程中派生的后续事件（`StackEvt`）。

mod base;
mod delete_other_paths;
mod delete_path;
mod evt;
mod make_path;
mod make_unit;
mod move_cmd;
mod stack;

pub use base::{CmdBase, ExistingPaths, Selection};
pub use delete_other_paths::DeleteOtherPathsCmdEvt;
pub use delete_path::DeletePathCmdEvt;
pub use evt::{CmdEvt, Command, EvtTag, SimEvt};
pub use make_path::MakePathCmdEvt;
pub use make_unit::MakeUnitCmdEvt;
pub use move_cmd::MoveCmdEvt;
pub use stack::{StackCmdEvt, StackEvt, StackTarget};
