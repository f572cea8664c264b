//! # XRC Tools - 配置、日志与统计
//!
//! **依赖原则**: 只依赖 `xrc-protocol` 与 `xrc-control`，不依赖 `xrc-driver`
//!
//! ## 包含模块
//!
//! - `config` - TOML 配置文件
//! - `tick_log` - 每 tick 一行的 CSV 日志
//! - `statistics` - 循环统计（可选）
//!
//! ## Feature Flags
//!
//! - `default` - 无默认 features
//! - `full` - 启用所有功能（包含 statistics）
//! - `statistics` - 启用统计模块

pub mod config;
pub mod tick_log;

#[cfg(feature = "statistics")]
pub mod statistics;

pub use config::{AutomationConfig, ConfigError};
pub use tick_log::{TickLog, TickLogError};

#[cfg(feature = "statistics")]
pub use statistics::TickStatistics;
