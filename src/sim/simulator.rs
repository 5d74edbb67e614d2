//! 仿真上下文
//!
//! `Sim` 独占路径表、单位登记、事件队列和命令历史，是所有命令唯一的修改入口。
//! 事件按 `(time, seq)` 逐个取出并执行完毕后才取下一个，命令效果不会交错。

use super::event_queue::EventQueue;
use super::time::SimTime;
use super::unit::Unit;
use crate::cmd::{CmdEvt, SimEvt};
use crate::path::{Path, PathId, Pos, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

#[derive(Debug, Default)]
pub struct Sim {
    now: SimTime,
    paths: Vec<Path>,
    units: BTreeMap<UnitId, Unit>,
    pub events: EventQueue,
    cmd_history: Vec<CmdEvt>,
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 入队一个事件，等价于 `sim.events.add(evt)`。
    pub fn add(&mut self, evt: impl Into<SimEvt>) {
        self.events.add(evt);
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.0)
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// 已执行命令的有序记录（只追加）
    pub fn cmd_history(&self) -> &[CmdEvt] {
        &self.cmd_history
    }

    pub(crate) fn record_cmd(&mut self, cmd: CmdEvt) {
        self.cmd_history.push(cmd);
    }

    /// 在 `time` 创建一条路径；尚未登记的单位一并登记。
    pub fn make_path(&mut self, time: SimTime, pos: Pos, speed: u32, units: &[UnitId]) -> PathId {
        let id = PathId(self.paths.len());
        for &u in units {
            self.units.entry(u).or_insert(Unit {
                id: u,
                made_at: time,
                made_on: None,
            });
        }
        self.paths.push(Path::new(id, time, pos, speed, units));
        debug!(path = %id, time = %time, ?pos, speed, units = units.len(), "创建路径");
        id
    }

    /// 在 `path` 上、`time` 时刻生产一个新单位；单位编号耗尽时返回 `None`。
    pub(crate) fn make_unit(&mut self, time: SimTime, path: PathId) -> Option<UnitId> {
        let id = match self.units.keys().next_back() {
            None => UnitId(0),
            Some(last) => match last.0.checked_add(1) {
                Some(n) => UnitId(n),
                None => {
                    warn!(path = %path, time = %time, "单位编号已耗尽，不再生产");
                    return None;
                }
            },
        };
        self.units.insert(
            id,
            Unit {
                id,
                made_at: time,
                made_on: Some(path),
            },
        );
        self.add_units(path, time, &[id]);
        Some(id)
    }

    /// `t` 时刻载有 `unit` 的所有路径（按 id 排序）
    pub fn paths_with_unit(&self, unit: UnitId, t: SimTime) -> Vec<PathId> {
        self.paths
            .iter()
            .filter(|p| p.segment_at(t).is_some_and(|s| s.contains(unit)))
            .map(|p| p.id)
            .collect()
    }

    pub(crate) fn add_units(&mut self, path: PathId, t: SimTime, units: &[UnitId]) {
        if let Some(p) = self.paths.get_mut(path.0) {
            p.add_units(t, units);
        }
    }

    pub(crate) fn remove_units(&mut self, path: PathId, t: SimTime, units: &[UnitId]) {
        if let Some(p) = self.paths.get_mut(path.0) {
            p.remove_units(t, units);
        }
    }

    /// 从 `t` 起把 `units` 从 `from` 换到 `into`。
    pub(crate) fn transfer_units(
        &mut self,
        from: PathId,
        into: PathId,
        t: SimTime,
        units: &[UnitId],
    ) {
        self.add_units(into, t, units);
        self.remove_units(from, t, units);
    }

    /// 把 `path` 上的 `units` 从 `t` 起移向 `dest`，返回实际移动的路径。
    ///
    /// 选中全部单位时直接给原路径追加移动；只选中一部分时，这些单位在 `t`
    /// 分离到一条同速度的新路径上再移动。路径在 `t` 不可移动时返回 `None`。
    pub(crate) fn move_units(
        &mut self,
        path: PathId,
        t: SimTime,
        units: &[UnitId],
        dest: Pos,
    ) -> Option<PathId> {
        let src = self.paths.get(path.0)?;
        if !src.can_move(t) {
            return None;
        }
        let present = src.units_at(t);
        let moving: Vec<UnitId> = units
            .iter()
            .copied()
            .filter(|u| present.contains(u))
            .collect();
        if moving.is_empty() {
            return None;
        }

        let target = if moving.len() == present.len() {
            path
        } else {
            let (pos, speed) = (src.pos_at(t), src.speed);
            self.remove_units(path, t, &moving);
            let split = self.make_path(t, pos, speed, &moving);
            trace!(from = %path, to = %split, "分离部分单位到新路径");
            split
        };
        self.paths[target.0].push_move(t, dest);
        Some(target)
    }

    /// 取出并执行最早的一个事件；队列为空时返回 `false`。
    pub fn step(&mut self) -> bool {
        let Some(ev) = self.events.pop_next() else {
            return false;
        };
        let at = ev.time();
        if at < self.now {
            debug!(now = %self.now, at = %at, "执行回溯事件");
        }
        self.now = self.now.max(at);
        ev.execute(self);
        true
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime) {
        while let Some(at) = self.events.peek_time() {
            if at > until {
                break;
            }
            self.step();
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) {
        info!("▶️  开始运行仿真");
        debug!(now = %self.now, queue_size = self.events.len(), "初始状态");

        let mut event_count = 0_u64;
        while self.step() {
            event_count += 1;
            trace!(event_num = event_count, now = %self.now, remaining_queue = self.events.len(), "事件已执行");
        }

        info!(
            total_events = event_count,
            final_time = %self.now,
            commands = self.cmd_history.len(),
            "✅ 仿真完成"
        );
    }

    /// `t` 时刻存在的路径的只读视图（渲染/回放校验用）
    pub fn snapshot(&self, t: SimTime) -> SimSnapshot {
        let paths = self
            .paths
            .iter()
            .filter(|p| p.exists_at(t))
            .map(|p| PathSnapshot {
                id: p.id,
                pos: p.pos_at(t),
                speed: p.speed,
                moving: p.is_moving_at(t),
                units: p.units_at(t).to_vec(),
            })
            .collect();
        SimSnapshot { time: t, paths }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub id: PathId,
    pub pos: Pos,
    pub speed: u32,
    pub moving: bool,
    pub units: Vec<UnitId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub paths: Vec<PathSnapshot>,
}
