use crate::cmd::{
    CmdBase, DeleteOtherPathsCmdEvt, DeletePathCmdEvt, MakePathCmdEvt, MakeUnitCmdEvt,
    MoveCmdEvt, Selection,
};
use crate::path::{PathId, Pos, UnitId};
use crate::sim::{Sim, SimTime};

fn base(time: u64, time_cmd: u64, paths: Selection) -> CmdBase {
    CmdBase::new(SimTime(time), SimTime(time_cmd), paths)
}

fn move_cmd(time: u64, time_cmd: u64, paths: Selection, dest: Pos) -> MoveCmdEvt {
    MoveCmdEvt {
        base: base(time, time_cmd, paths),
        dest,
    }
}

#[test]
fn move_whole_path_appends_a_move() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(1), UnitId(2)]);
    sim.add(move_cmd(
        0,
        0,
        Selection::new().with(a, [UnitId(1), UnitId(2)]),
        Pos::new(100, 0),
    ));
    sim.run();

    let pa = sim.path(a).expect("path a");
    assert_eq!(sim.paths().len(), 1);
    assert_eq!(pa.final_move().pos_end, Pos::new(100, 0));
    assert_eq!(pa.arrival_time(), SimTime(10_000));
}

#[test]
fn move_part_of_path_splits_units_onto_new_path() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(1), UnitId(2)]);
    sim.add(move_cmd(5, 5, Selection::new().with(a, [UnitId(1)]), Pos::new(0, 100)));
    sim.run();

    assert_eq!(sim.paths().len(), 2);
    let split = sim.path(PathId(1)).expect("split path");
    let pa = sim.path(a).expect("path a");
    assert_eq!(split.units_at(SimTime(5)), &[UnitId(1)][..]);
    assert_eq!(split.speed, 10);
    assert_eq!(split.final_move().pos_end, Pos::new(0, 100));
    assert_eq!(pa.units_at(SimTime(4)), &[UnitId(1), UnitId(2)][..]);
    assert_eq!(pa.units_at(SimTime(5)), &[UnitId(2)][..]);
    assert_eq!(pa.moves().len(), 1);
}

#[test]
fn retroactive_move_reads_occupancy_at_time_cmd() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(1)]);
    sim.add(MakeUnitCmdEvt {
        base: base(300, 300, Selection::new().with(a, [UnitId(1)])),
    });
    sim.run();
    assert_eq!(sim.path(a).expect("path a").units_at(SimTime(300)), &[UnitId(1), UnitId(2)][..]);

    // 在 100 时刻 u1 是路径上的全部单位，所以整条路径移动而不是分离
    sim.add(move_cmd(500, 100, Selection::new().with(a, [UnitId(1)]), Pos::new(50, 0)));
    sim.run();

    let pa = sim.path(a).expect("path a");
    assert_eq!(sim.paths().len(), 1);
    assert_eq!(pa.final_move().time_start, SimTime(100));
    assert_eq!(pa.final_move().pos_end, Pos::new(50, 0));
    assert_eq!(sim.now(), SimTime(500));
}

#[test]
fn retroactive_move_cannot_rewrite_committed_move() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(1)]);
    sim.add(move_cmd(200, 200, Selection::new().with(a, [UnitId(1)]), Pos::new(10, 0)));
    sim.add(move_cmd(300, 100, Selection::new().with(a, [UnitId(1)]), Pos::new(99, 0)));
    sim.run();

    let pa = sim.path(a).expect("path a");
    assert_eq!(pa.moves().len(), 2);
    assert_eq!(pa.final_move().pos_end, Pos::new(10, 0));
    assert_eq!(sim.cmd_history().len(), 2);
}

#[test]
fn command_against_units_that_left_affects_nothing() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(1), UnitId(2)]);
    sim.remove_units(a, SimTime(50), &[UnitId(1)]);

    sim.add(move_cmd(100, 100, Selection::new().with(a, [UnitId(1)]), Pos::new(10, 0)));
    sim.run();

    assert_eq!(sim.paths().len(), 1);
    assert_eq!(sim.path(a).expect("path a").moves().len(), 1);
    assert_eq!(sim.cmd_history().len(), 1);
}

#[test]
fn make_unit_adds_fresh_unit_from_time_cmd() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(1)]);
    sim.add(MakeUnitCmdEvt {
        base: base(10, 10, Selection::new().with(a, [UnitId(1)])),
    });
    sim.run();

    let pa = sim.path(a).expect("path a");
    assert_eq!(pa.units_at(SimTime(5)), &[UnitId(1)][..]);
    assert_eq!(pa.units_at(SimTime(10)), &[UnitId(1), UnitId(2)][..]);
    let made = sim.unit(UnitId(2)).expect("new unit");
    assert_eq!(made.made_on, Some(a));
    assert_eq!(made.made_at, SimTime(10));
}

#[test]
fn make_unit_stops_when_unit_ids_are_exhausted() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 10, &[UnitId(5), UnitId(u32::MAX)]);
    sim.add(MakeUnitCmdEvt {
        base: base(10, 10, Selection::new().with(a, [UnitId(5)])),
    });
    sim.run();

    assert_eq!(sim.cmd_history().len(), 1);
    assert_eq!(sim.units().count(), 2);
    let last = sim.unit(UnitId(u32::MAX)).expect("existing unit");
    assert_eq!(last.made_at, SimTime(0));
    assert_eq!(last.made_on, None);
    let pa = sim.path(a).expect("path a");
    assert_eq!(pa.segments().len(), 1);
    assert_eq!(pa.units_at(SimTime(10)), &[UnitId(5), UnitId(u32::MAX)][..]);
}

#[test]
fn make_unit_on_missing_path_makes_nothing() {
    let mut sim = Sim::new();
    sim.make_path(SimTime(100), Pos::ORIGIN, 10, &[UnitId(1)]);
    sim.add(MakeUnitCmdEvt {
        base: base(150, 10, Selection::new().with(PathId(0), [UnitId(1)])),
    });
    sim.run();

    assert_eq!(sim.units().count(), 1);
    assert_eq!(sim.cmd_history().len(), 1);
}

/// A 在原点载 u1，速度 4；在 0 时刻为 u1 开出一条去 (40,0) 的新路径。
fn with_made_path() -> (Sim, PathId, PathId) {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 4, &[UnitId(1)]);
    sim.add(MakePathCmdEvt {
        base: base(0, 0, Selection::new().with(a, [UnitId(1)])),
        dest: Pos::new(40, 0),
    });
    sim.run();
    (sim, a, PathId(1))
}

#[test]
fn make_path_duplicates_units_onto_a_moving_path() {
    let (sim, a, p) = with_made_path();

    let made = sim.path(p).expect("made path");
    assert_eq!(made.speed, 4);
    assert_eq!(made.units_at(SimTime(0)), &[UnitId(1)][..]);
    assert_eq!(made.final_move().pos_end, Pos::new(40, 0));
    assert_eq!(made.arrival_time(), SimTime(10_000));
    assert_eq!(sim.paths_with_unit(UnitId(1), SimTime(0)), vec![a, p]);
}

#[test]
fn delete_path_removes_units_that_have_another_path() {
    let (mut sim, a, p) = with_made_path();
    sim.add(DeletePathCmdEvt {
        base: base(20_000, 20_000, Selection::new().with(p, [UnitId(1)])),
    });
    sim.run();

    let made = sim.path(p).expect("made path");
    assert!(made.exists_at(SimTime(19_999)));
    assert!(!made.exists_at(SimTime(20_000)));
    assert!(made.segments().last().expect("segment").units.is_empty());
    assert_eq!(sim.paths_with_unit(UnitId(1), SimTime(20_000)), vec![a]);
}

#[test]
fn delete_path_keeps_a_units_last_path() {
    let mut sim = Sim::new();
    let a = sim.make_path(SimTime(0), Pos::ORIGIN, 4, &[UnitId(1)]);
    sim.add(DeletePathCmdEvt {
        base: base(10, 10, Selection::new().with(a, [UnitId(1)])),
    });
    sim.run();

    assert!(sim.path(a).expect("path a").exists_at(SimTime(10)));
    assert_eq!(sim.cmd_history().len(), 1);
}

#[test]
fn deleting_every_copy_keeps_the_last_one() {
    let (mut sim, a, p) = with_made_path();
    sim.add(DeletePathCmdEvt {
        base: base(
            20_000,
            20_000,
            Selection::new().with(a, [UnitId(1)]).with(p, [UnitId(1)]),
        ),
    });
    sim.run();

    assert!(!sim.path(a).expect("path a").exists_at(SimTime(20_000)));
    assert!(sim.path(p).expect("made path").exists_at(SimTime(20_000)));
}

#[test]
fn delete_other_paths_keeps_only_selected_path() {
    let (mut sim, a, p) = with_made_path();
    sim.add(DeleteOtherPathsCmdEvt {
        base: base(5_000, 5_000, Selection::new().with(p, [UnitId(1)])),
    });
    sim.run();

    assert!(sim.path(a).expect("path a").exists_at(SimTime(4_999)));
    assert!(!sim.path(a).expect("path a").exists_at(SimTime(5_000)));
    assert_eq!(sim.paths_with_unit(UnitId(1), SimTime(5_000)), vec![p]);
    assert_eq!(sim.paths_with_unit(UnitId(1), SimTime(0)), vec![a, p]);
}

#[test]
fn every_command_is_recorded_in_history_order() {
    let (mut sim, a, p) = with_made_path();
    sim.add(MakeUnitCmdEvt {
        base: base(30, 30, Selection::new().with(a, [UnitId(1)])),
    });
    sim.add(DeleteOtherPathsCmdEvt {
        base: base(20, 20, Selection::new().with(PathId(77), [UnitId(1)])),
    });
    sim.add(move_cmd(40, 40, Selection::new().with(p, [UnitId(1)]), Pos::new(0, 0)));
    sim.run();

    let times: Vec<u64> = sim.cmd_history().iter().map(|c| c.time().0).collect();
    assert_eq!(times, vec![0, 20, 30, 40]);
}
