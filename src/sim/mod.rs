//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件，如仿真时间、事件队列、单位登记和仿真上下文。

// 子模块声明
mod event_queue;
mod simulator;
mod time;
mod unit;

// 重新导出公共接口
pub use event_queue::EventQueue;
pub use simulator::{PathSnapshot, Sim, SimSnapshot};
pub use time::SimTime;
pub use unit::Unit;
