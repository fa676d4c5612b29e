//! 命令行界面支持
//!
//! 结果打印与交互式轨迹回放

mod printer;
mod replay;

pub use printer::{PrintMode, Printer};
pub use replay::{CommandResult, ReplaySession, DEFAULT_PLAY_INTERVAL};
