//! 随机网络生成
//!
//! 只在 i < j 的节点对之间连边，方向以较大概率朝向下标更大的节点，
//! 减少渲染时的交叉边；并保证源点有出边、汇点有入边。

use crate::error::{Error, Result};
use crate::types::{CapacityMatrix, MAX_NODES};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 随机网络参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomNetwork {
    /// 节点数（至少 2）
    pub node_count: usize,
    /// 每对节点连边的概率
    #[serde(default = "default_density")]
    pub density: f64,
    /// 连边时方向为 i→j（i < j）的概率
    #[serde(default = "default_forward_bias")]
    pub forward_bias: f64,
}

fn default_density() -> f64 {
    0.4
}

fn default_forward_bias() -> f64 {
    0.7
}

impl RandomNetwork {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            density: default_density(),
            forward_bias: default_forward_bias(),
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// 生成容量矩阵
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CapacityMatrix> {
        let n = self.node_count;
        if n < 2 {
            return Err(Error::InvalidInput(format!(
                "随机网络至少需要 2 个节点, 实际 {}",
                n
            )));
        }
        if n > MAX_NODES {
            return Err(Error::InvalidInput(format!(
                "随机网络最多 {} 个节点, 实际 {}",
                MAX_NODES, n
            )));
        }
        for (name, p) in [("density", self.density), ("forward_bias", self.forward_bias)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidInput(format!(
                    "{} 必须在 [0, 1] 内: {}",
                    name, p
                )));
            }
        }

        let mut matrix = CapacityMatrix::zeros(n);

        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_bool(self.density) {
                    let capacity = rng.gen_range(5..=24);
                    if rng.gen_bool(self.forward_bias) {
                        matrix.set(i, j, capacity)?;
                    } else {
                        matrix.set(j, i, capacity)?;
                    }
                }
            }
        }

        let sink = n - 1;

        if matrix.out_capacity(0) == 0 {
            let target = rng.gen_range(1..n);
            matrix.set(0, target, rng.gen_range(10..=24))?;
        }

        if matrix.in_capacity(sink) == 0 {
            let source = rng.gen_range(0..sink);
            matrix.set(source, sink, rng.gen_range(10..=24))?;
        }

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_source_and_sink_connected() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..10 {
            let matrix = RandomNetwork::new(n).generate(&mut rng).unwrap();
            assert_eq!(matrix.node_count(), n);
            assert!(matrix.out_capacity(0) > 0);
            assert!(matrix.in_capacity(n - 1) > 0);
        }
    }

    #[test]
    fn test_capacity_range_and_no_self_loops() {
        let mut rng = StdRng::seed_from_u64(42);
        let matrix = RandomNetwork::new(8)
            .with_density(1.0)
            .generate(&mut rng)
            .unwrap();
        for i in 0..8 {
            assert_eq!(matrix.get(i, i), 0);
            for j in 0..8 {
                let c = matrix.get(i, j);
                assert!(c == 0 || (5..=24).contains(&c));
                // 源汇补边之外，每对节点至多一个方向有边
                if (1..7).contains(&i) && (1..7).contains(&j) {
                    assert!(c == 0 || matrix.get(j, i) == 0);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_network() {
        let a = RandomNetwork::new(6).generate(&mut StdRng::seed_from_u64(1)).unwrap();
        let b = RandomNetwork::new(6).generate(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(RandomNetwork::new(1).generate(&mut rng).is_err());
        assert!(RandomNetwork::new(4).with_density(1.5).generate(&mut rng).is_err());
        assert!(matches!(
            RandomNetwork::new(MAX_NODES + 1).generate(&mut rng),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            RandomNetwork::new(1_000_000).generate(&mut rng),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(
            RandomNetwork::new(MAX_NODES).generate(&mut rng).unwrap().node_count(),
            MAX_NODES
        );
    }
}
