//! 具体机器人的自动化命令集
//!
//! 每个机器人配置对应一个控制布局和一组按固定顺序注册的命令。

pub mod charged_up;
pub mod rapid_react;

use crate::pipeline::Automation;
use crate::rate_limited::ControllerSettings;
use xrc_protocol::RobotProfile;

/// 按机器人配置构造管线
pub fn pipeline_for(profile: RobotProfile, settings: &ControllerSettings) -> Box<dyn Automation> {
    match profile {
        RobotProfile::RapidReact => Box::new(rapid_react::pipeline(settings)),
        RobotProfile::ChargedUp => Box::new(charged_up::pipeline(settings)),
    }
}
