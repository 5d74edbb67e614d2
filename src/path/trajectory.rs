//! 路径
//!
//! 路径持有有序且首尾相接的占用段和有序的移动列表。段永远不会被物理删除：
//! 被删除的路径会得到一个占用集为空的终止段，过去时刻的查询仍然可以看到历史。

use super::id::{PathId, UnitId};
use super::movement::Move;
use super::pos::Pos;
use super::segment::Segment;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub id: PathId,
    /// 移动速度（单位/秒）；只有速度相同的路径才能堆叠
    pub speed: u32,
    segments: Vec<Segment>,
    moves: Vec<Move>,
}

impl Path {
    /// 在 `time` 创建一条位于 `pos` 的路径，初始占用为 `units`。
    pub fn new(id: PathId, time: SimTime, pos: Pos, speed: u32, units: &[UnitId]) -> Self {
        Self {
            id,
            speed,
            segments: vec![Segment::new(time, units)],
            moves: vec![Move::stationary(time, pos)],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// 第 `idx` 段的结束时间；最后一段没有结束时间。
    pub fn segment_end(&self, idx: usize) -> Option<SimTime> {
        self.segments.get(idx + 1).map(|s| s.time_start)
    }

    /// `t` 时刻生效的段；`t` 早于路径创建时返回 `None`。
    pub fn segment_at(&self, t: SimTime) -> Option<&Segment> {
        self.segment_index_at(t).map(|i| &self.segments[i])
    }

    fn segment_index_at(&self, t: SimTime) -> Option<usize> {
        self.segments.iter().rposition(|s| s.time_start <= t)
    }

    /// `t` 时刻路径上的单位
    pub fn units_at(&self, t: SimTime) -> &[UnitId] {
        self.segment_at(t).map_or(&[], |s| s.units.as_slice())
    }

    /// 路径在 `t` 时刻是否存在（有段覆盖且占用非空）
    pub fn exists_at(&self, t: SimTime) -> bool {
        !self.units_at(t).is_empty()
    }

    /// 最后一次移动；路径创建时总有一次原地移动，所以它一定存在。
    pub fn final_move(&self) -> &Move {
        self.moves
            .last()
            .unwrap_or_else(|| panic!("path {} has no moves", self.id))
    }

    /// 路径到达最终目的地的时间
    pub fn arrival_time(&self) -> SimTime {
        self.final_move().time_end
    }

    pub fn pos_at(&self, t: SimTime) -> Pos {
        match self.moves.iter().rposition(|m| m.time_start <= t) {
            Some(i) => self.moves[i].pos_at(t),
            None => self.moves[0].pos_start,
        }
    }

    /// `t` 时刻是否还在移动中
    pub fn is_moving_at(&self, t: SimTime) -> bool {
        self.moves
            .iter()
            .rposition(|m| m.time_start <= t)
            .is_some_and(|i| self.moves[i].time_end > t)
    }

    /// 路径在 `t` 时刻是否还能接受新的移动命令。
    ///
    /// 已经在 `t` 之后开始的移动视为已提交的轨迹，不能被回溯改写。
    pub fn can_move(&self, t: SimTime) -> bool {
        self.speed > 0 && self.exists_at(t) && t >= self.final_move().time_start
    }

    /// 追加一次从 `t` 时刻位置前往 `dest` 的移动，返回到达时间。
    pub(crate) fn push_move(&mut self, t: SimTime, dest: Pos) -> SimTime {
        assert!(
            t >= self.final_move().time_start,
            "move on {} at {} would rewrite a committed move",
            self.id,
            t
        );
        let from = self.pos_at(t);
        let mv = Move::toward(t, from, dest, self.speed);
        trace!(path = %self.id, ?from, ?dest, arrive = %mv.time_end, "追加移动");
        self.moves.push(mv);
        mv.time_end
    }

    /// 覆盖 `t` 及其之后的所有段
    fn segments_from(&self, t: SimTime) -> impl Iterator<Item = &Segment> {
        let first = self.segment_index_at(t).unwrap_or(0);
        self.segments[first..].iter()
    }

    /// 在 `t` 处建立段边界，返回第一个起点 >= `t` 的段下标。
    fn split_at(&mut self, t: SimTime) -> usize {
        match self.segment_index_at(t) {
            None => 0,
            Some(i) if self.segments[i].time_start == t => i,
            Some(i) => {
                let seg = Segment {
                    time_start: t,
                    units: self.segments[i].units.clone(),
                };
                self.segments.insert(i + 1, seg);
                i + 1
            }
        }
    }

    /// 从 `t` 起把 `units` 加入路径（影响 `t` 之后的所有段）。
    pub(crate) fn add_units(&mut self, t: SimTime, units: &[UnitId]) {
        if self.segments_from(t).all(|s| units.iter().all(|&u| s.contains(u))) {
            return;
        }
        let from = self.split_at(t);
        for seg in &mut self.segments[from..] {
            seg.insert_units(units);
        }
        self.assert_ordered();
    }

    /// 从 `t` 起把 `units` 移出路径（影响 `t` 之后的所有段）。
    pub(crate) fn remove_units(&mut self, t: SimTime, units: &[UnitId]) {
        if !self.segments_from(t).any(|s| units.iter().any(|&u| s.contains(u))) {
            return;
        }
        let from = self.split_at(t);
        for seg in &mut self.segments[from..] {
            seg.remove_units(units);
        }
        self.assert_ordered();
    }

    // 段必须严格按起始时间递增，否则时间模型已经损坏，无法局部修复。
    fn assert_ordered(&self) {
        assert!(
            self.segments
                .windows(2)
                .all(|w| w[0].time_start < w[1].time_start),
            "segments of {} are not strictly ordered",
            self.id
        );
    }
}
