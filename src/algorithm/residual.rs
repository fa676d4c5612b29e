//! 残量网络
//!
//! 以稠密矩阵保存每条边的剩余容量，增广时原地修改

use crate::error::{Error, Result};
use crate::types::{Capacity, CapacityMatrix, NodeIndex};
use serde::{Deserialize, Serialize};

/// 残量矩阵
///
/// 不变式：任意时刻 `residual[i][j] >= 0`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualMatrix {
    cells: Vec<Vec<Capacity>>,
}

impl ResidualMatrix {
    /// 从容量矩阵深拷贝初始化
    pub fn from_capacity(capacity: &CapacityMatrix) -> Self {
        Self {
            cells: capacity.rows().to_vec(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    /// 边 from→to 的剩余容量
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Capacity {
        self.cells[from][to]
    }

    /// 扣减剩余容量
    ///
    /// # Panics
    ///
    /// 扣减后为负时 panic。瓶颈值取路径上的最小残量，正确实现下不会发生。
    pub fn decrease(&mut self, from: NodeIndex, to: NodeIndex, amount: Capacity) {
        let cell = &mut self.cells[from][to];
        assert!(
            *cell >= amount,
            "残量不变式被破坏: residual[{}][{}] = {} < {}",
            from,
            to,
            *cell,
            amount
        );
        *cell -= amount;
    }

    /// 增加剩余容量（反向边）
    ///
    /// 结果超出整数范围时返回 [`Error::InvalidInput`]，残量保持不变。
    pub fn increase(&mut self, from: NodeIndex, to: NodeIndex, amount: Capacity) -> Result<()> {
        let cell = &mut self.cells[from][to];
        *cell = cell.checked_add(amount).ok_or_else(|| {
            Error::InvalidInput(format!("残量溢出: residual[{}][{}] + {}", from, to, amount))
        })?;
        Ok(())
    }

    /// u 出发、残量为正的邻居，按下标升序
    pub fn neighbors(&self, from: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.cells[from]
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value > 0)
            .map(|(to, _)| to)
    }

    /// 当前状态的独立副本
    pub fn snapshot(&self) -> Vec<Vec<Capacity>> {
        self.cells.clone()
    }

    pub fn rows(&self) -> &[Vec<Capacity>] {
        &self.cells
    }
}

impl From<Vec<Vec<Capacity>>> for ResidualMatrix {
    fn from(cells: Vec<Vec<Capacity>>) -> Self {
        Self { cells }
    }
}
