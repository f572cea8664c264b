//! # XRC Protocol
//!
//! 仿真器状态快照的数据模型与文本格式（无 IO、无控制逻辑）
//!
//! ## 模块
//!
//! - `vector`: 三维向量
//! - `pose`: 刚体位姿与语义角色
//! - `robot`: 机器人配置（角色表）与机器人状态
//! - `elements`: 场地元素分类
//! - `game`: 比赛阶段、剩余时间、联盟
//! - `gamepad`: 手柄输入状态
//! - `output`: 下游控制输出记录（`Controls.txt` 格式）
//! - `snapshot`: 单个 tick 的完整快照
//!
//! ## 坐标约定
//!
//! 仿真器使用 Y 轴向上的左手坐标系，水平面为 X/Z，角度单位为度。

pub mod elements;
pub mod game;
pub mod gamepad;
pub mod output;
pub mod pose;
pub mod robot;
pub mod snapshot;
pub mod vector;

pub use elements::{ElementKind, GameElementState};
pub use game::{Alliance, GamePhase, GameState};
pub use gamepad::GamepadState;
pub use output::ControlOutput;
pub use pose::{PoseRole, RigidBodyPose};
pub use robot::{RobotProfile, RobotState};
pub use snapshot::{SnapshotTexts, WorldSnapshot};
pub use vector::Vector3;

use thiserror::Error;

/// 快照解析错误类型
///
/// 任意一种错误都意味着这一 tick 的快照不完整，必须整体丢弃并重试。
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing key '{key}' in {context}")]
    MissingKey { key: &'static str, context: &'static str },

    #[error("Invalid game phase: {0:?}")]
    InvalidPhase(String),

    #[error("Invalid game state: {0}")]
    InvalidGameState(String),

    #[error("Robot profile {profile} is missing required part {role:?}")]
    MissingRole { profile: RobotProfile, role: PoseRole },

    #[error("Robot file does not contain a robot info entry")]
    MissingRobotInfo,

    #[error("Invalid alliance: {0:?}")]
    InvalidAlliance(String),

    #[error("Invalid gamepad line: {0:?}")]
    InvalidGamepadLine(String),
}
