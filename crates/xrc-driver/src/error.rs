//! 驱动层错误类型定义

use std::path::PathBuf;
use thiserror::Error;
use xrc_protocol::ProtocolError;

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 文件读写错误
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 快照解析错误
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DriverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DriverError::Io { path: path.into(), source }
    }

    /// 是否为单个 tick 内的暂时性错误（文件正被改写、JSON 不完整等）
    ///
    /// 暂时性错误只丢弃当前 tick；其他错误终止循环。
    pub fn is_transient(&self) -> bool {
        !matches!(self, DriverError::ConfigError(_))
    }
}
