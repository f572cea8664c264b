//! Controller trait - 控制器通用接口
//!
//! # 设计理念
//!
//! - **Tick 模式**: 调用方控制循环，控制器只负责计算
//! - **时间感知**: 显式传入 `dt`，便于单元测试
//! - **错误处理**: 关联类型 `Error` 允许自定义错误
//!
//! # 示例
//!
//! ```rust
//! use xrc_control::Controller;
//! use std::time::Duration;
//!
//! struct Proportional {
//!     gain: f64,
//! }
//!
//! impl Controller for Proportional {
//!     type Error = std::convert::Infallible;
//!
//!     fn tick(&mut self, input: f64, _dt: Duration) -> Result<f64, Self::Error> {
//!         Ok(-self.gain * input)
//!     }
//!
//!     fn reset(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//! ```

use std::time::Duration;

/// 控制器通用接口
///
/// `input` 是被控量的测量值；以误差作为输入时设定值为 0。
///
/// `Controller` 本身不要求 `Send` 或 `Sync`，管线是单线程的。
pub trait Controller {
    /// 控制器错误类型
    type Error: std::error::Error + Send + 'static;

    /// 计算一步控制输出
    ///
    /// # 参数
    ///
    /// - `input`: 当前输入
    /// - `dt`: 时间步长
    fn tick(&mut self, input: f64, dt: Duration) -> Result<f64, Self::Error>;

    /// 清除所有内部状态（积分、上一次输入）
    fn reset(&mut self) -> Result<(), Self::Error>;
}
