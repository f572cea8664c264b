//! Rapid React 机器人（双侧进球口 + 射球罩 + 爬升钩）
//!
//! 命令注册顺序：
//!
//! 1. [`TranslationCommand`] - 靠近最近的本方 cargo 时自动横移
//! 2. [`RotationCommand`] - 自动转向 Hub / 最近的 cargo
//! 3. [`IntakeCommand`] - 进球口翻板位置
//! 4. [`ShooterCommand`] - 持有三个 cargo 超时前自动射球
//! 5. [`HoodCommand`] - 按距离查表调整射球罩角度
//! 6. [`ClimberCommand`] - 终局阶段自动爬升

mod climber;
mod controls;
mod hood;
mod intake;
mod rotation;
mod shooter;
mod translation;

pub use climber::{ClimberCommand, fold_hook_angle};
pub use controls::RapidReactControls;
pub use hood::{HOOD_ANGLES, HoodCommand, measured_hood_angle, target_hood_angle};
pub use intake::{IntakeCommand, IntakeMode, IntakePosition};
pub use rotation::RotationCommand;
pub use shooter::ShooterCommand;
pub use translation::TranslationCommand;

use crate::pipeline::CommandPipeline;
use crate::rate_limited::ControllerSettings;
use xrc_protocol::RobotProfile;

/// 构造 Rapid React 管线
pub fn pipeline(settings: &ControllerSettings) -> CommandPipeline<RapidReactControls> {
    CommandPipeline::new(RobotProfile::RapidReact)
        .with_command(TranslationCommand)
        .with_command(RotationCommand::new(settings))
        .with_command(IntakeCommand::new())
        .with_command(ShooterCommand::new())
        .with_command(HoodCommand::new(settings))
        .with_command(ClimberCommand::new(settings))
}
