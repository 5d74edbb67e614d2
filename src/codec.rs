//! 事件编解码
//!
//! 每种事件用稳定的数字编号区分，线上格式为 `{"tag": u8, "body": {...}}`。
//! 命令历史导出为这种信封组成的 JSON 数组，供存档、回放和联机转发使用。

use crate::cmd::{
    CmdEvt, DeleteOtherPathsCmdEvt, DeletePathCmdEvt, EvtTag, MakePathCmdEvt, MakeUnitCmdEvt,
    MoveCmdEvt, SimEvt, StackCmdEvt, StackEvt,
};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvt {
    pub tag: u8,
    pub body: Value,
}

pub fn to_wire(evt: &SimEvt) -> Result<WireEvt, CodecError> {
    let body = match evt {
        SimEvt::Cmd(CmdEvt::Move(c)) => serde_json::to_value(c)?,
        SimEvt::Cmd(CmdEvt::MakeUnit(c)) => serde_json::to_value(c)?,
        SimEvt::Cmd(CmdEvt::MakePath(c)) => serde_json::to_value(c)?,
        SimEvt::Cmd(CmdEvt::DeletePath(c)) => serde_json::to_value(c)?,
        SimEvt::Cmd(CmdEvt::DeleteOtherPaths(c)) => serde_json::to_value(c)?,
        SimEvt::Cmd(CmdEvt::Stack(c)) => serde_json::to_value(c)?,
        SimEvt::Stack(e) => serde_json::to_value(e)?,
    };
    Ok(WireEvt {
        tag: evt.tag() as u8,
        body,
    })
}

pub fn from_wire(wire: &WireEvt) -> Result<SimEvt, CodecError> {
    let tag = EvtTag::try_from(wire.tag).map_err(CodecError::UnknownTag)?;
    let body = wire.body.clone();
    Ok(match tag {
        EvtTag::Move => serde_json::from_value::<MoveCmdEvt>(body)?.into(),
        EvtTag::MakeUnit => serde_json::from_value::<MakeUnitCmdEvt>(body)?.into(),
        EvtTag::MakePath => serde_json::from_value::<MakePathCmdEvt>(body)?.into(),
        EvtTag::DeletePath => serde_json::from_value::<DeletePathCmdEvt>(body)?.into(),
        EvtTag::DeleteOtherPaths => serde_json::from_value::<DeleteOtherPathsCmdEvt>(body)?.into(),
        EvtTag::Stack => serde_json::from_value::<StackCmdEvt>(body)?.into(),
        EvtTag::StackEvt => serde_json::from_value::<StackEvt>(body)?.into(),
    })
}

/// 只接受命令；系统派生事件不属于命令流。
pub fn cmd_from_wire(wire: &WireEvt) -> Result<CmdEvt, CodecError> {
    match from_wire(wire)? {
        SimEvt::Cmd(c) => Ok(c),
        other => Err(CodecError::NotACommand(other.tag())),
    }
}

pub fn encode_evt(evt: &SimEvt) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&to_wire(evt)?)?)
}

pub fn decode_evt(raw: &str) -> Result<SimEvt, CodecError> {
    let wire: WireEvt = serde_json::from_str(raw)?;
    from_wire(&wire)
}

pub fn history_to_wire(history: &[CmdEvt]) -> Result<Vec<WireEvt>, CodecError> {
    history
        .iter()
        .map(|c| to_wire(&SimEvt::Cmd(c.clone())))
        .collect()
}

pub fn encode_history(history: &[CmdEvt]) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&history_to_wire(history)?)?)
}

pub fn decode_history(raw: &str) -> Result<Vec<CmdEvt>, CodecError> {
    let wires: Vec<WireEvt> = serde_json::from_str(raw)?;
    wires.iter().map(cmd_from_wire).collect()
}
