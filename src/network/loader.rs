//! 容量矩阵导入
//!
//! 支持 JSON（二维数组）和 CSV（无表头，每行一行矩阵）

use crate::error::{Error, Result};
use crate::types::{Capacity, CapacityMatrix};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 矩阵文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    Json,
    Csv,
}

impl MatrixFormat {
    /// 按扩展名判断，未知扩展名按 CSV 处理
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => MatrixFormat::Json,
            _ => MatrixFormat::Csv,
        }
    }
}

/// 从文件加载容量矩阵
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<CapacityMatrix> {
    let path = path.as_ref();
    let format = MatrixFormat::from_path(path);
    let file = File::open(path)?;
    let matrix = read_matrix(BufReader::new(file), format)?;

    tracing::debug!(
        path = %path.display(),
        nodes = matrix.node_count(),
        "容量矩阵已加载"
    );

    Ok(matrix)
}

/// 从任意读取器解析容量矩阵
pub fn read_matrix<R: Read>(reader: R, format: MatrixFormat) -> Result<CapacityMatrix> {
    let rows = match format {
        MatrixFormat::Json => serde_json::from_reader::<_, Vec<Vec<Capacity>>>(reader)
            .map_err(|e| Error::ParseError(format!("JSON 矩阵格式错误: {}", e)))?,
        MatrixFormat::Csv => parse_csv(reader)?,
    };
    CapacityMatrix::new(rows)
}

fn parse_csv<R: Read>(reader: R) -> Result<Vec<Vec<Capacity>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<Capacity>().map_err(|e| {
                    Error::ParseError(format!(
                        "第 {} 行第 {} 列不是整数 '{}': {}",
                        line + 1,
                        col + 1,
                        field,
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(rows)
}
