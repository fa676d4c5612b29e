//! 增广路径查找
//!
//! 在残量网络上做 BFS，找到边数最少的增广路径（Edmonds-Karp）

use super::residual::ResidualMatrix;
use crate::types::{Capacity, Edge, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 增广路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// 从源点到汇点的边序列
    pub edges: Vec<Edge>,
    /// 瓶颈容量（路径上的最小残量）
    pub bottleneck: Capacity,
}

impl AugmentingPath {
    /// 路径边数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 路径经过的节点序列
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.edges.iter().map(|e| e.to));
        nodes
    }

    /// 形如 `0→1 → 1→3 → 3→5` 的描述
    pub fn describe(&self) -> String {
        self.edges
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// BFS 查找一条最短增广路径
///
/// 对每个出队节点按下标升序扩展残量为正的邻居，汇点第一次被发现时立即停止。
/// 固定的扩展顺序保证相同输入得到相同路径。不修改残量矩阵。
pub fn find_augmenting_path(
    residual: &ResidualMatrix,
    source: NodeIndex,
    sink: NodeIndex,
) -> Option<AugmentingPath> {
    if source == sink {
        return None;
    }

    let n = residual.node_count();
    let mut visited = vec![false; n];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in residual.neighbors(u) {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            parent[v] = Some(u);

            if v == sink {
                return Some(reconstruct_path(residual, source, sink, &parent));
            }
            queue.push_back(v);
        }
    }

    None
}

/// 沿父指针回溯重构路径并计算瓶颈
fn reconstruct_path(
    residual: &ResidualMatrix,
    source: NodeIndex,
    sink: NodeIndex,
    parent: &[Option<NodeIndex>],
) -> AugmentingPath {
    let mut edges = Vec::new();
    let mut bottleneck = Capacity::MAX;
    let mut current = sink;

    while current != source {
        let Some(prev) = parent[current] else {
            break;
        };
        bottleneck = bottleneck.min(residual.get(prev, current));
        edges.push(Edge::new(prev, current));
        current = prev;
    }

    edges.reverse();

    AugmentingPath { edges, bottleneck }
}

/// 源点在残量网络中可达的节点
pub fn reachable_from(residual: &ResidualMatrix, source: NodeIndex) -> Vec<bool> {
    let mut visited = vec![false; residual.node_count()];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in residual.neighbors(u) {
            if !visited[v] {
                visited[v] = true;
                queue.push_back(v);
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CapacityMatrix;

    fn residual(rows: Vec<Vec<Capacity>>) -> ResidualMatrix {
        ResidualMatrix::from_capacity(&CapacityMatrix::new(rows).unwrap())
    }

    #[test]
    fn test_shortest_path_preferred() {
        // 0 -> 1 -> 2 -> 3 (长) 与 0 -> 3 (短)
        let r = residual(vec![
            vec![0, 9, 0, 2],
            vec![0, 0, 9, 0],
            vec![0, 0, 0, 9],
            vec![0, 0, 0, 0],
        ]);
        let path = find_augmenting_path(&r, 0, 3).unwrap();
        assert_eq!(path.edges, vec![Edge::new(0, 3)]);
        assert_eq!(path.bottleneck, 2);
    }

    #[test]
    fn test_tie_break_lowest_index() {
        // 两条等长路径 0->1->3 与 0->2->3，取下标小的 1
        let r = residual(vec![
            vec![0, 4, 6, 0],
            vec![0, 0, 0, 5],
            vec![0, 0, 0, 7],
            vec![0, 0, 0, 0],
        ]);
        let path = find_augmenting_path(&r, 0, 3).unwrap();
        assert_eq!(path.nodes(), vec![0, 1, 3]);
        assert_eq!(path.bottleneck, 4);
        assert_eq!(path.describe(), "0→1 → 1→3");
    }

    #[test]
    fn test_no_path() {
        let r = residual(vec![vec![0, 3, 0], vec![0, 0, 0], vec![0, 0, 0]]);
        assert!(find_augmenting_path(&r, 0, 2).is_none());
    }

    #[test]
    fn test_does_not_mutate() {
        let r = residual(vec![vec![0, 3], vec![0, 0]]);
        let before = r.clone();
        let _ = find_augmenting_path(&r, 0, 1);
        assert_eq!(r, before);
    }

    #[test]
    fn test_reachable_from() {
        let r = residual(vec![vec![0, 3, 0], vec![0, 0, 0], vec![0, 1, 0]]);
        assert_eq!(reachable_from(&r, 0), vec![true, true, false]);
    }
}
