//! 事件队列
//!
//! 全局按 `(time, seq)` 排序的待执行事件集合。相同时间的事件按入队顺序出队，
//! 这是锁步联机回放确定性的前提。

use super::time::SimTime;
use crate::cmd::SimEvt;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// 队列条目；排序只看 `(at, seq)`，事件内容不参与比较。
#[derive(Debug)]
struct Pending {
    at: SimTime,
    seq: u64,
    ev: SimEvt,
}

impl Pending {
    fn key(&self) -> (SimTime, u64) {
        (self.at, self.seq)
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

#[derive(Debug, Default)]
pub struct EventQueue {
    next_seq: u64,
    // BinaryHeap 是最大堆，包一层 Reverse 让最早的 (at, seq) 先出队
    q: BinaryHeap<Reverse<Pending>>,
}

impl EventQueue {
    /// 按事件自身的 `time` 入队。入队是事件被执行的唯一途径。
    pub fn add(&mut self, evt: impl Into<SimEvt>) {
        let ev = evt.into();
        let at = ev.time();
        let seq = self.next_seq;
        trace!(event_kind = ev.name(), at = %at, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(Reverse(Pending { at, seq, ev }));

        debug!(queue_size = self.q.len(), "事件已加入队列");
    }

    /// 取出最早的事件；队列为空时返回 `None`（空闲状态，不是错误）。
    pub fn pop_next(&mut self) -> Option<SimEvt> {
        self.q.pop().map(|Reverse(item)| item.ev)
    }

    /// 最早事件的时间
    pub fn peek_time(&self) -> Option<SimTime> {
        self.q.peek().map(|Reverse(item)| item.at)
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}
