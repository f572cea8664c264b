//! # XRC Driver
//!
//! 仿真器文件接口与节拍控制。
//!
//! ## 模块
//!
//! - `source`: 快照来源（`SnapshotSource`），默认从状态目录读取三个文件
//! - `gamepad`: 手柄来源（`GamepadSource`）
//! - `sink`: 控制输出目标（`ControlSink`），原子写入 `Controls.txt`
//! - `runner`: 固定频率的自动化循环
//!
//! 所有 IO 都在这里完成；`xrc-control` 只处理内存中的快照。

pub mod error;
pub mod gamepad;
pub mod runner;
pub mod sink;
pub mod source;

pub use error::DriverError;
pub use gamepad::{FileGamepad, GamepadSource, NullGamepad};
pub use runner::{LoopConfig, LoopStats, TickObserver, run_automation};
pub use sink::{ControlSink, FileControlSink};
pub use source::{FileSnapshotSource, SnapshotSource};
