//! 单位登记
//!
//! 单位本身只是一个标识符；核心只关心它出现在哪些路径段里。

use crate::path::{PathId, UnitId};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

/// 单位登记信息（只记录来源，不参与任何判定）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub made_at: SimTime,
    /// 由哪条路径生产；初始单位为 `None`
    #[serde(default)]
    pub made_on: Option<PathId>,
}
