//! 通用类型定义：节点、边、容量矩阵

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点编号（矩阵行列下标）
pub type NodeIndex = usize;

/// 容量 / 流量值
pub type Capacity = i64;

/// 随机生成与 HTTP 接口接受的最大节点数
pub const MAX_NODES: usize = 128;

/// 有向边 (from, to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeIndex,
    pub to: NodeIndex,
}

impl Edge {
    pub fn new(from: NodeIndex, to: NodeIndex) -> Self {
        Self { from, to }
    }
}

impl From<(NodeIndex, NodeIndex)> for Edge {
    fn from((from, to): (NodeIndex, NodeIndex)) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}

/// 容量矩阵
///
/// `matrix[i][j]` 为有向边 i→j 的容量，0 表示无边。
/// 构造时校验方阵、非负，以及容量总和不会溢出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Capacity>>", into = "Vec<Vec<Capacity>>")]
pub struct CapacityMatrix {
    rows: Vec<Vec<Capacity>>,
}

impl CapacityMatrix {
    /// 从二维数组创建并校验
    pub fn new(rows: Vec<Vec<Capacity>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::InvalidInput("容量矩阵不能为空".to_string()));
        }

        let mut total: Capacity = 0;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidInput(format!(
                    "容量矩阵必须为方阵: 第 {} 行有 {} 列, 期望 {} 列",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if value < 0 {
                    return Err(Error::InvalidInput(format!(
                        "容量不能为负: matrix[{}][{}] = {}",
                        i, j, value
                    )));
                }
                // 总容量有界保证残量与累计流量都不会溢出
                total = total.checked_add(value).ok_or_else(|| {
                    Error::InvalidInput("容量总和超出整数范围".to_string())
                })?;
            }
        }

        Ok(Self { rows })
    }

    /// n 个节点的全零矩阵
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: vec![vec![0; n]; n],
        }
    }

    /// 节点数
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Capacity {
        self.rows[from][to]
    }

    /// 设置容量
    ///
    /// 与 [`CapacityMatrix::new`] 相同的约束：负值或使总容量溢出的值被拒绝，矩阵保持不变。
    pub fn set(&mut self, from: NodeIndex, to: NodeIndex, value: Capacity) -> Result<()> {
        if value < 0 {
            return Err(Error::InvalidInput(format!(
                "容量不能为负: matrix[{}][{}] = {}",
                from, to, value
            )));
        }
        let others = self.total_capacity() - self.rows[from][to];
        others
            .checked_add(value)
            .ok_or_else(|| Error::InvalidInput("容量总和超出整数范围".to_string()))?;
        self.rows[from][to] = value;
        Ok(())
    }

    /// 所有边的容量总和
    pub fn total_capacity(&self) -> Capacity {
        self.rows.iter().flatten().sum()
    }

    pub fn rows(&self) -> &[Vec<Capacity>] {
        &self.rows
    }

    /// 所有容量为正的边，按 (from, to) 升序
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value > 0 {
                    edges.push(Edge::new(i, j));
                }
            }
        }
        edges
    }

    /// 节点出边容量之和
    pub fn out_capacity(&self, node: NodeIndex) -> Capacity {
        self.rows[node].iter().sum()
    }

    /// 节点入边容量之和
    pub fn in_capacity(&self, node: NodeIndex) -> Capacity {
        self.rows.iter().map(|row| row[node]).sum()
    }
}

impl TryFrom<Vec<Vec<Capacity>>> for CapacityMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<Capacity>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<CapacityMatrix> for Vec<Vec<Capacity>> {
    fn from(matrix: CapacityMatrix) -> Self {
        matrix.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_square() {
        let err = CapacityMatrix::new(vec![vec![0, 1], vec![0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_negative() {
        let err = CapacityMatrix::new(vec![vec![0, -3], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_empty_and_overflow() {
        assert!(CapacityMatrix::new(vec![]).is_err());
        let huge = CapacityMatrix::new(vec![vec![0, i64::MAX], vec![1, 0]]);
        assert!(huge.is_err());
    }

    #[test]
    fn test_edges_and_degrees() {
        let m = CapacityMatrix::new(vec![vec![0, 3, 2], vec![0, 0, 4], vec![0, 0, 0]]).unwrap();
        assert_eq!(
            m.edges(),
            vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 2)]
        );
        assert_eq!(m.out_capacity(0), 5);
        assert_eq!(m.in_capacity(2), 6);
        assert_eq!(m.total_capacity(), 9);
    }

    #[test]
    fn test_set_keeps_invariants() {
        let mut m = CapacityMatrix::zeros(4);
        m.set(0, 1, 5).unwrap();
        assert!(matches!(m.set(0, 2, -5), Err(Error::InvalidInput(_))));
        assert_eq!(m.get(0, 2), 0);

        // 单条边可以取到上界，但第二条会让总和溢出
        m.set(0, 1, i64::MAX).unwrap();
        assert!(matches!(m.set(1, 3, 1), Err(Error::InvalidInput(_))));
        assert_eq!(m.get(1, 3), 0);

        // 覆盖同一条边时按替换后的总和计算
        m.set(0, 1, 10).unwrap();
        m.set(1, 3, i64::MAX - 10).unwrap();
        assert_eq!(m.total_capacity(), i64::MAX);
    }

    #[test]
    fn test_serde_validates() {
        let m: CapacityMatrix = serde_json::from_str("[[0,5],[0,0]]").unwrap();
        assert_eq!(m.get(0, 1), 5);
        assert!(serde_json::from_str::<CapacityMatrix>("[[0,-1],[0,0]]").is_err());
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[0,5],[0,0]]");
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::new(2, 4).to_string(), "2→4");
        assert_eq!(Edge::from((4, 2)), Edge::new(4, 2));
    }
}
