use crate::cmd::{CmdBase, MakeUnitCmdEvt, Selection, SimEvt};
use crate::sim::{EventQueue, Sim, SimTime};

// 空选择的命令只会写入历史，用 `time_cmd` 当作标记观察出队顺序。
fn marker(time: u64, id: u64) -> MakeUnitCmdEvt {
    MakeUnitCmdEvt {
        base: CmdBase::new(SimTime(time), SimTime(id), Selection::new()),
    }
}

fn drained(sim: &Sim) -> Vec<u64> {
    sim.cmd_history().iter().map(|c| c.base().time_cmd.0).collect()
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let mut sim = Sim::new();
    sim.add(marker(10, 1));
    sim.add(marker(5, 2));
    sim.add(marker(10, 3));

    sim.run();

    assert_eq!(drained(&sim), vec![2, 1, 3]);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn queue_pops_equal_times_in_insertion_order() {
    let mut q = EventQueue::default();
    for id in 0..5 {
        q.add(marker(3, id));
    }
    assert_eq!(q.len(), 5);
    assert_eq!(q.peek_time(), Some(SimTime(3)));

    let mut ids = Vec::new();
    while let Some(SimEvt::Cmd(c)) = q.pop_next() {
        ids.push(c.base().time_cmd.0);
    }
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert!(q.is_empty());
}

#[test]
fn empty_queue_is_idle_not_an_error() {
    let mut sim = Sim::new();
    assert!(sim.events.pop_next().is_none());
    assert!(!sim.step());
    sim.run();
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn run_until_skips_events_after_until_and_advances_time() {
    let mut sim = Sim::new();
    sim.add(marker(0, 1));
    sim.add(marker(10, 2));

    sim.run_until(SimTime(5));
    assert_eq!(drained(&sim), vec![1]);
    assert_eq!(sim.now(), SimTime(5));
    assert_eq!(sim.events.len(), 1);

    sim.run();
    assert_eq!(drained(&sim), vec![1, 2]);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn run_until_executes_events_scheduled_exactly_at_until() {
    let mut sim = Sim::new();
    sim.add(marker(5, 1));

    sim.run_until(SimTime(5));
    assert_eq!(drained(&sim), vec![1]);
    assert_eq!(sim.now(), SimTime(5));
}

#[test]
fn run_until_advances_time_even_if_there_are_no_events() {
    let mut sim = Sim::new();
    sim.run_until(SimTime(7));
    assert_eq!(sim.now(), SimTime(7));
    assert!(sim.cmd_history().is_empty());
}

#[test]
fn retroactive_event_runs_next_without_rewinding_clock() {
    let mut sim = Sim::new();
    sim.run_until(SimTime(20));
    sim.add(marker(30, 1));
    sim.add(marker(5, 2));

    assert!(sim.step());
    assert_eq!(drained(&sim), vec![2]);
    assert_eq!(sim.now(), SimTime(20));

    sim.run();
    assert_eq!(drained(&sim), vec![2, 1]);
    assert_eq!(sim.now(), SimTime(30));
}
