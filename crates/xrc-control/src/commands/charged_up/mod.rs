//! Charged Up 机器人（升降 + 滑台机械臂）
//!
//! 只注册一个命令：[`ArmCommand`]。

mod arm;
mod controls;

pub use arm::{
    ArmCommand, ArmSetpoint, ArmSituation, GamePiece, GroundOverride, PickupSource, PlaceTier,
};
pub use controls::ChargedUpControls;

use crate::pipeline::CommandPipeline;
use crate::rate_limited::ControllerSettings;
use xrc_protocol::RobotProfile;

/// 构造 Charged Up 管线
pub fn pipeline(settings: &ControllerSettings) -> CommandPipeline<ChargedUpControls> {
    CommandPipeline::new(RobotProfile::ChargedUp).with_command(ArmCommand::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::charged_up_snapshot;
    use std::time::{Duration, Instant};
    use xrc_protocol::{RigidBodyPose, Vector3};

    #[test]
    fn test_registration_order() {
        let pipeline = pipeline(&ControllerSettings::default());
        assert_eq!(pipeline.command_names(), vec!["arm"]);
    }

    #[test]
    fn test_stowed_arm_is_quiet() {
        let mut pipeline = pipeline(&ControllerSettings::default());
        let snapshot = charged_up_snapshot().gamepad(|g| g.dpad_right = true).build();

        let controls = pipeline.run_controls(&snapshot, Instant::now());
        assert_eq!(controls.elevator_up, 0.0);
        assert_eq!(controls.elevator_down, 0.0);
        assert!(!controls.slide_out && !controls.slide_in);
        // 预设按钮被清除
        assert!(!controls.high_arm);
    }

    #[test]
    fn test_tier_change_moves_arm() {
        let mut pipeline = pipeline(&ControllerSettings::default());
        let t0 = Instant::now();
        // 红方社区内，机械臂处于 High/Cone 位置
        let at_high = |press: bool| {
            charged_up_snapshot()
                .body(0.0, 0.1, -6.0)
                .part(lift(0.978))
                .part(slide(0.978 + 0.424))
                .gamepad(|g| g.dpad_up = press)
                .build()
        };

        // Low → High：已在目标位置
        let controls = pipeline.run_controls(&at_high(true), t0);
        assert!(controls.elevator_up.abs() < 1e-9 && controls.elevator_down.abs() < 1e-9);
        assert!(!controls.slide_out && !controls.slide_in);

        pipeline.run_controls(&at_high(false), t0 + Duration::from_millis(250));

        // High → Mid：升降下降、滑台收回
        let controls = pipeline.run_controls(&at_high(true), t0 + Duration::from_millis(500));
        assert!((controls.elevator_down - 0.835).abs() < 1e-9);
        assert_eq!(controls.elevator_up, 0.0);
        assert!(controls.slide_in && !controls.slide_out);
        assert!(!controls.station_arm);
    }

    fn lift(y: f64) -> RigidBodyPose {
        RigidBodyPose::at(Vector3::ZERO)
            .with_name("Lift")
            .with_local_position(Vector3::new(0.0, y, 0.0))
    }

    fn slide(y: f64) -> RigidBodyPose {
        RigidBodyPose::at(Vector3::ZERO)
            .with_name("Slide")
            .with_local_position(Vector3::new(0.0, y, 0.0))
    }
}
