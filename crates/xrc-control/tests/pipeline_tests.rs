//! 管线端到端测试
//!
//! 通过公开 API 构造快照，逐 tick 驱动完整的命令管线。

use std::time::{Duration, Instant};
use xrc_control::commands::{charged_up, pipeline_for, rapid_react};
use xrc_control::{Automation, ControllerSettings};
use xrc_protocol::{
    Alliance, GameElementState, GamePhase, GameState, GamepadState, RigidBodyPose, RobotProfile,
    RobotState, Vector3, WorldSnapshot,
};

fn part(name: &str) -> RigidBodyPose {
    RigidBodyPose::at(Vector3::ZERO).with_name(name)
}

fn charged_up(body: Vector3, lift: f64, slide: f64, gamepad: GamepadState) -> WorldSnapshot {
    let robot = RobotState::from_poses(
        RobotProfile::ChargedUp,
        vec![
            RigidBodyPose::at(body).with_name("Body").with_global_rotation(Vector3::ZERO),
            part("Lift").with_local_position(Vector3::new(0.0, lift, 0.0)),
            part("Slide").with_local_position(Vector3::new(0.0, lift + slide, 0.0)),
        ],
    )
    .unwrap();
    WorldSnapshot::new(
        robot,
        GameElementState::from_elements(RobotProfile::ChargedUp, Vec::new()),
        GameState { phase: GamePhase::Teleop, time_left: 100.0 },
        gamepad,
        Alliance::Red,
    )
}

fn rapid_react(body: Vector3, heading: f64, cargo: &[(i64, &str, Vector3)]) -> WorldSnapshot {
    let robot = RobotState::from_poses(
        RobotProfile::RapidReact,
        vec![
            RigidBodyPose::at(body)
                .with_name("Body")
                .with_global_rotation(Vector3::new(0.0, heading, 0.0)),
            part("Indicator").with_local_rotation(Vector3::new(90.0, 0.0, 0.0)),
            part("IntakeFlap1").with_local_position(Vector3::new(0.0, 0.3, 0.0)),
            part("IntakeFlap2").with_local_position(Vector3::new(0.0, 0.3, 0.0)),
            part("Hook1").with_local_rotation(Vector3::ZERO),
        ],
    )
    .unwrap();
    let elements: Vec<_> = cargo
        .iter()
        .map(|&(id, name, at)| RigidBodyPose::at(at).with_id(id).with_type(1).with_name(name))
        .collect();
    WorldSnapshot::new(
        robot,
        GameElementState::from_elements(RobotProfile::RapidReact, elements),
        GameState { phase: GamePhase::Teleop, time_left: 100.0 },
        GamepadState::default(),
        Alliance::Red,
    )
}

#[test]
fn test_arm_follows_tier_change() {
    let mut pipeline = charged_up::pipeline(&ControllerSettings::default());
    let community = Vector3::new(0.0, 0.1, -6.0);
    let press = GamepadState { dpad_up: true, ..Default::default() };
    let t0 = Instant::now();

    // Low → High，机械臂停在 High/Cone
    pipeline.run_at(&charged_up(community, 0.978, 0.424, press), t0);
    pipeline.run_at(
        &charged_up(community, 0.978, 0.424, GamepadState::default()),
        t0 + Duration::from_millis(200),
    );

    // High → Mid
    let output = pipeline.run_at(
        &charged_up(community, 0.978, 0.424, press),
        t0 + Duration::from_millis(400),
    );
    // 升降：下降；滑台：收回；预设按钮不外泄
    assert!(output.trigger_l > 0.8);
    assert_eq!(output.trigger_r, 0.0);
    assert!(output.x && !output.b);
    assert!(!output.dpad_up && !output.dpad_left && !output.dpad_right && !output.dpad_down);
}

#[test]
fn test_arm_stows_outside_zones() {
    let mut pipeline = pipeline_for(RobotProfile::ChargedUp, &ControllerSettings::default());
    let output = pipeline.run(&charged_up(
        Vector3::new(0.0, 0.1, 0.0),
        0.6,
        0.4,
        GamepadState::default(),
    ));

    assert_eq!(output.trigger_l, 1.0);
    assert!(output.x);
}

#[test]
fn test_rapid_react_shoots_before_penalty() {
    let mut pipeline = rapid_react::pipeline(&ControllerSettings::default());
    let body = Vector3::new(0.0, 0.1, 3.0);
    let held = [
        (1, "Ball_Red", Vector3::new(0.1, 0.1, 3.0)),
        (2, "Ball_Red", Vector3::new(-0.1, 0.1, 3.0)),
        (3, "Ball_Blue", Vector3::new(0.0, 0.1, 3.1)),
    ];
    let snapshot = rapid_react(body, 0.0, &held);
    let t0 = Instant::now();

    assert!(!pipeline.run_at(&snapshot, t0).y);
    assert!(!pipeline.run_at(&snapshot, t0 + Duration::from_millis(1000)).y);
    assert!(pipeline.run_at(&snapshot, t0 + Duration::from_millis(1500)).y);
}

#[test]
fn test_rapid_react_passthrough_without_targets() {
    let mut pipeline = pipeline_for(RobotProfile::RapidReact, &ControllerSettings::default());
    let output = pipeline.run(&rapid_react(Vector3::new(0.0, 0.1, 3.05), 0.0, &[]));

    // 没有 cargo：不横移、不转向
    assert_eq!(output.left_x, 0.0);
    assert_eq!(output.right_x, 0.0);
    // 射球罩始终受控：精细控制键按下
    assert!(output.bumper_l && output.bumper_r);
    assert!(output.dpad_up);
}
