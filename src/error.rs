//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// 输入不满足前置条件（非方阵、负容量、源汇点非法）
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 增广迭代次数达到上限仍未结束
    #[error("迭代次数超过上限: {limit}")]
    IterationLimitExceeded { limit: usize },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),

    #[error("服务器错误: {0}")]
    ServerError(String),
}

impl Error {
    /// 是否为调用方输入错误（可修正后重试）
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::ParseError(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::ParseError(e.to_string())
    }
}
