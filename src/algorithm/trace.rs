//! 执行轨迹
//!
//! 每次增广记录一个不可变快照，供外部逐步回放

use super::augmenting::AugmentingPath;
use super::residual::ResidualMatrix;
use crate::types::{Capacity, Edge};
use serde::{Deserialize, Serialize};

/// 单步轨迹记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// 可读的步骤描述
    pub description: String,
    /// 本步结束时残量矩阵的深拷贝
    pub residual_snapshot: Vec<Vec<Capacity>>,
    /// 本步使用的增广路径
    pub path: Vec<Edge>,
    /// 本步增加的流量
    pub flow_added: Capacity,
    /// 截至本步的累计流量
    pub cumulative_flow: Capacity,
    /// 是否为终止步
    pub is_terminal: bool,
}

impl TraceStep {
    /// 初始步：尚未增广
    pub fn initial(residual: &ResidualMatrix) -> Self {
        Self {
            description: "算法初始化，从原始容量网络开始。".to_string(),
            residual_snapshot: residual.snapshot(),
            path: Vec::new(),
            flow_added: 0,
            cumulative_flow: 0,
            is_terminal: false,
        }
    }

    /// 增广步
    pub fn augmentation(
        residual: &ResidualMatrix,
        path: &AugmentingPath,
        cumulative_flow: Capacity,
    ) -> Self {
        Self {
            description: format!(
                "找到增广路径: {}，流量: {}",
                path.describe(),
                path.bottleneck
            ),
            residual_snapshot: residual.snapshot(),
            path: path.edges.clone(),
            flow_added: path.bottleneck,
            cumulative_flow,
            is_terminal: false,
        }
    }

    /// 终止步：不存在更多增广路径
    pub fn terminal(residual: &ResidualMatrix, cumulative_flow: Capacity) -> Self {
        Self {
            description: format!(
                "算法完成，不存在更多增广路径。最大流: {}",
                cumulative_flow
            ),
            residual_snapshot: residual.snapshot(),
            path: Vec::new(),
            flow_added: 0,
            cumulative_flow,
            is_terminal: true,
        }
    }

    /// 边是否在本步路径上
    pub fn uses_edge(&self, from: usize, to: usize) -> bool {
        self.path.iter().any(|e| e.from == from && e.to == to)
    }
}

/// 最大流计算结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowResult {
    /// 最大流量值
    pub max_flow: Capacity,
    /// 有序轨迹：初始步、每次增广一步、终止步
    pub trace: Vec<TraceStep>,
}

impl FlowResult {
    /// 增广次数（不含初始与终止步）
    pub fn augmentation_count(&self) -> usize {
        self.trace
            .iter()
            .filter(|step| !step.is_terminal && !step.path.is_empty())
            .count()
    }

    /// 最后一步（终止步）
    pub fn final_step(&self) -> Option<&TraceStep> {
        self.trace.last()
    }

    /// 终止时的残量矩阵
    pub fn final_residual(&self) -> Option<ResidualMatrix> {
        self.final_step()
            .map(|step| ResidualMatrix::from(step.residual_snapshot.clone()))
    }
}
