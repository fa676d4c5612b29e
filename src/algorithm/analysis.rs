//! 结果分析
//!
//! 从终止残量推导边流量、最小割和饱和边，以及渲染布局用的 BFS 分层

use super::augmenting::reachable_from;
use super::residual::ResidualMatrix;
use crate::types::{Capacity, CapacityMatrix, Edge, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 最小割
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// 源侧节点（残量网络中源点可达），升序
    pub source_side: Vec<NodeIndex>,
    /// 从源侧指向汇侧的原始边
    pub cut_edges: Vec<Edge>,
    /// 割容量，等于最大流
    pub capacity: Capacity,
}

/// 每条边上的正向流量
///
/// `capacity[i][j] - residual[i][j]` 为 i→j 的净流量，反平行边互为相反数，
/// 只保留正值。
pub fn edge_flows(capacity: &CapacityMatrix, residual: &ResidualMatrix) -> Vec<Vec<Capacity>> {
    let n = capacity.node_count();
    let mut flows = vec![vec![0; n]; n];
    for (i, row) in flows.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (capacity.get(i, j) - residual.get(i, j)).max(0);
        }
    }
    flows
}

/// 节点的净流出量（流出减流入）
pub fn net_outflow(flows: &[Vec<Capacity>], node: NodeIndex) -> Capacity {
    let out: Capacity = flows[node].iter().sum();
    let inflow: Capacity = flows.iter().map(|row| row[node]).sum();
    out - inflow
}

/// 计算最小割
pub fn min_cut(capacity: &CapacityMatrix, residual: &ResidualMatrix, source: NodeIndex) -> MinCut {
    let reachable = reachable_from(residual, source);

    let source_side: Vec<NodeIndex> = reachable
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r)
        .map(|(i, _)| i)
        .collect();

    let cut_edges: Vec<Edge> = capacity
        .edges()
        .into_iter()
        .filter(|e| reachable[e.from] && !reachable[e.to])
        .collect();

    let total = cut_edges.iter().map(|e| capacity.get(e.from, e.to)).sum();

    MinCut {
        source_side,
        cut_edges,
        capacity: total,
    }
}

/// 流量等于容量的边（限制最大流的关键边）
pub fn saturated_edges(
    capacity: &CapacityMatrix,
    residual: &ResidualMatrix,
) -> Vec<(Edge, Capacity)> {
    let flows = edge_flows(capacity, residual);
    capacity
        .edges()
        .into_iter()
        .filter(|e| flows[e.from][e.to] == capacity.get(e.from, e.to))
        .map(|e| (e, capacity.get(e.from, e.to)))
        .collect()
}

/// 按 BFS 深度对节点分层
///
/// 只沿原始容量为正的边扩展；源点不可达的节点归入第 0 层。
pub fn bfs_layers(capacity: &CapacityMatrix, source: NodeIndex) -> Vec<Vec<NodeIndex>> {
    let n = capacity.node_count();
    let mut depth = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if capacity.get(u, v) > 0 && !visited[v] {
                visited[v] = true;
                depth[v] = depth[u] + 1;
                queue.push_back(v);
            }
        }
    }

    let max_depth = depth.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::new(); max_depth + 1];
    for (node, &d) in depth.iter().enumerate() {
        layers[d].push(node);
    }
    layers
}
