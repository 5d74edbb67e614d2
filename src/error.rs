//! 错误类型
//!
//! 命令本身是全函数，不会失败；错误只出现在编解码、场景加载和回放校验这些边界上。

use crate::cmd::EvtTag;
use crate::path::PathId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown event tag {0}")]
    UnknownTag(u8),

    #[error("event tag {0:?} is not a command")]
    NotACommand(EvtTag),
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema_version {got} (expected {expected})")]
    UnsupportedSchema { got: u32, expected: u32 },

    #[error("path #{index} has no speed and the scenario defines no default speed")]
    MissingSpeed { index: usize },

    #[error("invalid command: {0}")]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("replayed history has {replayed} commands, original had {original}")]
    HistoryLength { original: usize, replayed: usize },

    #[error("replayed history diverged at command #{index}")]
    HistoryDiverged { index: usize },

    #[error("replayed state diverged at path {path}")]
    StateDiverged { path: PathId },

    #[error("replayed path table has {replayed} paths, original had {original}")]
    PathCount { original: usize, replayed: usize },
}
