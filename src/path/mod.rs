//! 路径模型
//!
//! 路径是按时间切片的轨迹：有序的占用段（谁在路径上）加上有序的移动（路径去哪）。

mod id;
mod movement;
mod pos;
mod segment;
mod trajectory;

pub use id::{PathId, UnitId};
pub use movement::Move;
pub use pos::Pos;
pub use segment::Segment;
pub use trajectory::Path;
