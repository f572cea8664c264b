//! # XRC Control
//!
//! 每个 tick 的自动化决策管线：快照 → 几何缓存 → 命令管线 → 控制输出。
//!
//! ## 模块
//!
//! - `geometry`: 角度归一化、方位角、最近对象搜索
//! - `cache`: 单个快照作用域内的几何量缓存（`GeometryCache`）
//! - `controller` / `pid` / `rate_limited`: 控制器接口、PID、限频控制器
//! - `mode`: 边沿触发的模式状态机
//! - `timer`: 截止时间计时器
//! - `region`: 联盟相关的区域判断
//! - `actuator`: 执行器辅助（死区开关控制、双向输出拆分、手动接管）
//! - `pipeline`: 命令管线框架
//! - `commands`: 具体机器人的自动化命令集
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use xrc_control::commands::rapid_react;
//! use xrc_control::{Automation, ControllerSettings};
//! # fn example(snapshot: &xrc_protocol::WorldSnapshot) {
//! let mut pipeline = rapid_react::pipeline(&ControllerSettings::default());
//! let output = pipeline.run(snapshot);
//! # let _ = output;
//! # }
//! ```
//!
//! 本 crate 不做任何 IO：快照获取、输出写入、节拍控制由 `xrc-driver` 负责。

pub mod actuator;
pub mod cache;
pub mod commands;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod pid;
pub mod pipeline;
pub mod rate_limited;
pub mod region;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{GeometryCache, HubGeometry, PieceTarget};
pub use controller::Controller;
pub use error::ControlError;
pub use geometry::{IntakeSide, Nearest};
pub use mode::{CyclicMode, EdgeTrigger, ModeCycler, ModeSelector};
pub use pid::PidController;
pub use pipeline::{Automation, Command, CommandPipeline, ControlLayout};
pub use rate_limited::{ControllerSettings, RateLimitedController};
pub use region::{AllianceRegion, Bounds, Mirror, Region};
pub use timer::{DeadlineTimer, TimerState};
