//! 内置示例网络

use crate::types::{CapacityMatrix, NodeIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 示例网络
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 经典 6 节点网络，最大流 23
    Classic,
    /// 5 节点网络，最大流 18
    Second,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Classic, Preset::Second]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Second => "second",
        }
    }

    pub fn matrix(&self) -> CapacityMatrix {
        match self {
            Preset::Classic => classic_example(),
            Preset::Second => second_example(),
        }
    }

    /// 源点固定为 0
    pub fn default_source(&self) -> NodeIndex {
        0
    }

    /// 汇点为最后一个节点
    pub fn default_sink(&self) -> NodeIndex {
        self.matrix().node_count() - 1
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" | "1" => Ok(Preset::Classic),
            "second" | "2" => Ok(Preset::Second),
            other => Err(crate::Error::ParseError(format!("未知示例: {}", other))),
        }
    }
}

/// 经典 6 节点网络
pub fn classic_example() -> CapacityMatrix {
    from_static(&[
        [0, 16, 13, 0, 0, 0],
        [0, 0, 10, 12, 0, 0],
        [0, 4, 0, 0, 14, 0],
        [0, 0, 9, 0, 0, 20],
        [0, 0, 0, 7, 0, 4],
        [0, 0, 0, 0, 0, 0],
    ])
}

/// 5 节点网络
pub fn second_example() -> CapacityMatrix {
    from_static(&[
        [0, 10, 8, 0, 0],
        [0, 0, 5, 15, 0],
        [0, 0, 0, 0, 10],
        [0, 0, 6, 0, 12],
        [0, 0, 0, 0, 0],
    ])
}

fn from_static<const N: usize>(rows: &[[i64; N]; N]) -> CapacityMatrix {
    let rows = rows.iter().map(|row| row.to_vec()).collect();
    // 内置矩阵都是小的非负方阵，校验不会失败
    CapacityMatrix::new(rows).unwrap_or_else(|_| CapacityMatrix::zeros(N))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::EdmondsKarp;

    #[test]
    fn test_presets_solve() {
        let expected = [(Preset::Classic, 23), (Preset::Second, 18)];
        for (preset, flow) in expected {
            let matrix = preset.matrix();
            let result = EdmondsKarp::new(&matrix)
                .max_flow(preset.default_source(), preset.default_sink())
                .unwrap();
            assert_eq!(result.max_flow, flow, "{}", preset);
        }
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("Classic".parse::<Preset>().unwrap(), Preset::Classic);
        assert_eq!("2".parse::<Preset>().unwrap(), Preset::Second);
        assert!("third".parse::<Preset>().is_err());
        assert_eq!(Preset::Second.default_sink(), 4);
    }
}
