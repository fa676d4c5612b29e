//! 最大流算法模块
//!
//! 包含残量网络、增广路径查找、带轨迹的 Edmonds-Karp 引擎，
//! 以及结果分析与轨迹回放

pub mod analysis;
mod augmenting;
mod batch;
mod max_flow;
mod player;
mod residual;
mod trace;

pub use analysis::{bfs_layers, edge_flows, min_cut, saturated_edges, MinCut};
pub use augmenting::{find_augmenting_path, reachable_from, AugmentingPath};
pub use batch::{solve_batch, FlowProblem};
pub use max_flow::{
    compute_max_flow, compute_max_flow_with, validate_terminals, EdmondsKarp, FlowOptions,
};
pub use player::{step_label, AutoPlay, TracePlayer};
pub use residual::ResidualMatrix;
pub use trace::{FlowResult, TraceStep};
