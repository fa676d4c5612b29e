//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson），
//! 在计算最大流的同时记录每次增广的轨迹，用于逐步回放

use super::augmenting::find_augmenting_path;
use super::residual::ResidualMatrix;
use super::trace::{FlowResult, TraceStep};
use crate::error::{Error, Result};
use crate::types::{Capacity, CapacityMatrix, NodeIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// 算法配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOptions {
    /// 增广次数上限；`None` 时取 `2 × n × n`
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

impl FlowOptions {
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// n 个节点时生效的迭代上限
    pub fn iteration_limit(&self, node_count: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| 2 * node_count * node_count)
    }
}

/// Edmonds-Karp 最大流算法
///
/// 只借用调用方的容量矩阵；每次计算都在自己的残量副本上进行，
/// 结果中不保留任何对内部状态的引用。
pub struct EdmondsKarp<'a> {
    capacity: &'a CapacityMatrix,
    options: FlowOptions,
}

impl<'a> EdmondsKarp<'a> {
    /// 创建算法实例
    pub fn new(capacity: &'a CapacityMatrix) -> Self {
        Self {
            capacity,
            options: FlowOptions::default(),
        }
    }

    /// 设置算法配置
    pub fn with_options(mut self, options: FlowOptions) -> Self {
        self.options = options;
        self
    }

    /// 计算从 source 到 sink 的最大流并记录轨迹
    pub fn max_flow(&self, source: NodeIndex, sink: NodeIndex) -> Result<FlowResult> {
        validate_terminals(self.capacity, source, sink)?;

        let n = self.capacity.node_count();
        let limit = self.options.iteration_limit(n);

        let mut residual = ResidualMatrix::from_capacity(self.capacity);
        let mut trace = vec![TraceStep::initial(&residual)];
        let mut total: Capacity = 0;
        let mut iterations = 0;

        // Edmonds-Karp: 重复 BFS 找增广路径
        while let Some(path) = find_augmenting_path(&residual, source, sink) {
            if iterations >= limit {
                warn!(limit, nodes = n, "增广次数达到上限，放弃计算");
                return Err(Error::IterationLimitExceeded { limit });
            }
            iterations += 1;

            // 沿路径增广，同时为反向边补充残量
            for edge in &path.edges {
                residual.decrease(edge.from, edge.to, path.bottleneck);
                residual.increase(edge.to, edge.from, path.bottleneck)?;
            }
            total = total
                .checked_add(path.bottleneck)
                .ok_or_else(|| Error::InvalidInput("累计流量超出整数范围".to_string()))?;

            debug!(
                iteration = iterations,
                path = %path.describe(),
                bottleneck = path.bottleneck,
                total,
                "增广"
            );

            trace.push(TraceStep::augmentation(&residual, &path, total));
        }

        trace.push(TraceStep::terminal(&residual, total));

        info!(
            nodes = n,
            source,
            sink,
            augmentations = iterations,
            max_flow = total,
            "最大流计算完成"
        );

        Ok(FlowResult {
            max_flow: total,
            trace,
        })
    }
}

/// 计算最大流（默认配置）
///
/// `capacity` 必须是非负整数方阵，`source != sink` 且均为合法下标，
/// 否则返回 [`Error::InvalidInput`]，不产生任何轨迹。
pub fn compute_max_flow(
    capacity: &[Vec<Capacity>],
    source: NodeIndex,
    sink: NodeIndex,
) -> Result<FlowResult> {
    compute_max_flow_with(capacity, source, sink, &FlowOptions::default())
}

/// 计算最大流（指定配置）
pub fn compute_max_flow_with(
    capacity: &[Vec<Capacity>],
    source: NodeIndex,
    sink: NodeIndex,
    options: &FlowOptions,
) -> Result<FlowResult> {
    let matrix = CapacityMatrix::new(capacity.to_vec())?;
    EdmondsKarp::new(&matrix)
        .with_options(options.clone())
        .max_flow(source, sink)
}

/// 校验源点与汇点
pub fn validate_terminals(
    capacity: &CapacityMatrix,
    source: NodeIndex,
    sink: NodeIndex,
) -> Result<()> {
    let n = capacity.node_count();
    if source >= n {
        return Err(Error::InvalidInput(format!(
            "源点 {} 超出范围 (节点数 {})",
            source, n
        )));
    }
    if sink >= n {
        return Err(Error::InvalidInput(format!(
            "汇点 {} 超出范围 (节点数 {})",
            sink, n
        )));
    }
    if source == sink {
        return Err(Error::InvalidInput(format!(
            "源点与汇点不能相同: {}",
            source
        )));
    }
    Ok(())
}
