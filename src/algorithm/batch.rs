//! 批量计算
//!
//! 多个互不相关的网络并行求解，每个网络独立分配残量矩阵

use super::max_flow::{EdmondsKarp, FlowOptions};
use super::trace::FlowResult;
use crate::error::Result;
use crate::types::{CapacityMatrix, NodeIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 单个最大流问题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowProblem {
    pub capacity: CapacityMatrix,
    pub source: NodeIndex,
    pub sink: NodeIndex,
    #[serde(default)]
    pub options: FlowOptions,
}

impl FlowProblem {
    pub fn new(capacity: CapacityMatrix, source: NodeIndex, sink: NodeIndex) -> Self {
        Self {
            capacity,
            source,
            sink,
            options: FlowOptions::default(),
        }
    }

    pub fn solve(&self) -> Result<FlowResult> {
        EdmondsKarp::new(&self.capacity)
            .with_options(self.options.clone())
            .max_flow(self.source, self.sink)
    }
}

/// 并行求解，结果顺序与输入一致
pub fn solve_batch(problems: &[FlowProblem]) -> Vec<Result<FlowResult>> {
    problems.par_iter().map(FlowProblem::solve).collect()
}
