//! 场景描述
//!
//! 场景 JSON 给出初始路径和一串命令，既是运行配置也是回放日志：
//! 运行结束后用同样的初始路径加上记录下的命令历史就能重建一局。

use crate::cmd::CmdEvt;
use crate::codec::{self, WireEvt};
use crate::error::{CodecError, ReplayError, ScenarioError};
use crate::path::{Pos, UnitId};
use crate::sim::{Sim, SimTime};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// 当前支持的 `schema_version`
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    #[serde(default)]
    pub defaults: Option<ScenarioDefaults>,
    pub paths: Vec<PathSpec>,
    #[serde(default)]
    pub commands: Vec<WireEvt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    /// 路径未指定速度时使用
    #[serde(default)]
    pub speed: Option<u32>,
    /// 默认运行到的时间（毫秒）；不指定则运行到队列为空
    #[serde(default)]
    pub until_ms: Option<u64>,
}

/// 初始路径；按出现顺序分配 `PathId(0)`, `PathId(1)`, ...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSpec {
    #[serde(default)]
    pub time_ms: Option<u64>,
    #[serde(default)]
    pub pos: Pos,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub units: Vec<UnitId>,
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn until(&self) -> Option<SimTime> {
        self.defaults
            .as_ref()
            .and_then(|d| d.until_ms)
            .map(SimTime::from_millis)
    }

    /// 构建初始路径并把所有命令放入事件队列。
    pub fn build(&self) -> Result<Sim, ScenarioError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedSchema {
                got: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        let default_speed = self.defaults.as_ref().and_then(|d| d.speed);

        let mut sim = Sim::new();
        for (index, spec) in self.paths.iter().enumerate() {
            let speed = spec
                .speed
                .or(default_speed)
                .ok_or(ScenarioError::MissingSpeed { index })?;
            let time = SimTime::from_millis(spec.time_ms.unwrap_or(0));
            sim.make_path(time, spec.pos, speed, &spec.units);
        }
        for wire in &self.commands {
            sim.add(codec::cmd_from_wire(wire)?);
        }
        Ok(sim)
    }

    /// 同样的初始路径，命令换成 `history`。
    pub fn with_history(&self, history: &[CmdEvt]) -> Result<ScenarioSpec, CodecError> {
        Ok(ScenarioSpec {
            commands: codec::history_to_wire(history)?,
            ..self.clone()
        })
    }

    /// 构建并运行；`until` 为 `None` 时运行到队列为空。
    pub fn run(&self, until: Option<SimTime>) -> Result<Sim, ScenarioError> {
        let mut sim = self.build()?;
        match until.or_else(|| self.until()) {
            Some(t) => sim.run_until(t),
            None => sim.run(),
        }
        Ok(sim)
    }
}

/// 回放校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub commands: usize,
    pub paths: usize,
    pub final_time: SimTime,
}

/// 运行场景，再用记录下的命令历史重放一次，要求历史和路径表逐项一致。
#[tracing::instrument(skip(spec))]
pub fn verify_replay(
    spec: &ScenarioSpec,
    until: Option<SimTime>,
) -> Result<ReplayReport, ReplayError> {
    let original = spec.run(until)?;
    let replay_spec = spec.with_history(original.cmd_history())?;
    let replayed = replay_spec.run(until)?;

    let a = codec::history_to_wire(original.cmd_history())?;
    let b = codec::history_to_wire(replayed.cmd_history())?;
    if a.len() != b.len() {
        return Err(ReplayError::HistoryLength {
            original: a.len(),
            replayed: b.len(),
        });
    }
    if let Some(index) = a.iter().zip(&b).position(|(x, y)| x != y) {
        return Err(ReplayError::HistoryDiverged { index });
    }

    if original.paths().len() != replayed.paths().len() {
        return Err(ReplayError::PathCount {
            original: original.paths().len(),
            replayed: replayed.paths().len(),
        });
    }
    if let Some(p) = original
        .paths()
        .iter()
        .zip(replayed.paths())
        .find(|(x, y)| x != y)
        .map(|(x, _)| x.id)
    {
        return Err(ReplayError::StateDiverged { path: p });
    }

    let report = ReplayReport {
        commands: a.len(),
        paths: original.paths().len(),
        final_time: original.now(),
    };
    info!(commands = report.commands, paths = report.paths, "回放一致");
    Ok(report)
}
