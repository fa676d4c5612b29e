//! FlowTrace - 带轨迹回放的最大流求解器
//!
//! 以 Edmonds-Karp 算法计算容量网络的最大流，并记录每一次增广：
//! - 每步保存残量矩阵的独立快照、增广路径和累计流量
//! - BFS 按节点下标升序扩展，相同输入得到完全相同的轨迹
//! - 最小割、边流量等结果分析
//! - 命令行回放和 HTTP API

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod network;
pub mod server;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    compute_max_flow, compute_max_flow_with, EdmondsKarp, FlowOptions, FlowResult, TraceStep,
};
pub use error::{Error, Result};
pub use types::{Capacity, CapacityMatrix, Edge, NodeIndex, MAX_NODES};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
