//! 控制层错误类型

use thiserror::Error;

/// 控制层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    /// 控制器收到 NaN 或无穷大输入
    #[error("Controller received non-finite input: {0}")]
    NonFiniteInput(f64),

    /// 控制器参数无效
    #[error("Invalid controller settings: {0}")]
    InvalidSettings(String),
}
