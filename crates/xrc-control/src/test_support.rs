//! 单元测试用的快照构造器

use xrc_protocol::{
    Alliance, GameElementState, GamePhase, GameState, GamepadState, RigidBodyPose, RobotProfile,
    RobotState, Vector3, WorldSnapshot,
};

pub(crate) struct SnapshotBuilder {
    profile: RobotProfile,
    body: Vector3,
    heading: f64,
    parts: Vec<RigidBodyPose>,
    elements: Vec<RigidBodyPose>,
    game: GameState,
    gamepad: GamepadState,
    alliance: Alliance,
}

fn part(name: &str) -> RigidBodyPose {
    RigidBodyPose::at(Vector3::ZERO).with_name(name)
}

/// Rapid React 机器人：停在原点、两侧进球口抬起、射球罩 0°、钩子 0°
pub(crate) fn rapid_react_snapshot() -> SnapshotBuilder {
    SnapshotBuilder {
        profile: RobotProfile::RapidReact,
        body: Vector3::new(0.0, 0.1, 0.0),
        heading: 0.0,
        parts: vec![
            part("Indicator").with_local_rotation(Vector3::new(90.0, 0.0, 0.0)),
            part("IntakeFlap1").with_local_position(Vector3::new(0.0, 0.5, 0.0)),
            part("IntakeFlap2").with_local_position(Vector3::new(0.0, 0.5, 0.0)),
            part("Hook1").with_local_rotation(Vector3::ZERO),
        ],
        elements: Vec::new(),
        game: GameState { phase: GamePhase::Teleop, time_left: 90.0 },
        gamepad: GamepadState::default(),
        alliance: Alliance::Red,
    }
}

/// Charged Up 机器人：停在原点、机械臂收起（升降 0.130，伸出 0.287）
pub(crate) fn charged_up_snapshot() -> SnapshotBuilder {
    SnapshotBuilder {
        profile: RobotProfile::ChargedUp,
        body: Vector3::new(0.0, 0.1, 0.0),
        heading: 0.0,
        parts: vec![
            part("Lift").with_local_position(Vector3::new(0.0, 0.130, 0.0)),
            part("Slide").with_local_position(Vector3::new(0.0, 0.130 + 0.287, 0.0)),
        ],
        elements: Vec::new(),
        game: GameState { phase: GamePhase::Teleop, time_left: 90.0 },
        gamepad: GamepadState::default(),
        alliance: Alliance::Red,
    }
}

impl SnapshotBuilder {
    pub(crate) fn body(mut self, x: f64, y: f64, z: f64) -> Self {
        self.body = Vector3::new(x, y, z);
        self
    }

    pub(crate) fn heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub(crate) fn phase(mut self, phase: GamePhase) -> Self {
        self.game.phase = phase;
        self
    }

    pub(crate) fn alliance(mut self, alliance: Alliance) -> Self {
        self.alliance = alliance;
        self
    }

    pub(crate) fn gamepad(mut self, edit: impl FnOnce(&mut GamepadState)) -> Self {
        edit(&mut self.gamepad);
        self
    }

    /// 替换同名部件
    pub(crate) fn part(mut self, pose: RigidBodyPose) -> Self {
        self.parts.retain(|p| p.name != pose.name);
        self.parts.push(pose);
        self
    }

    pub(crate) fn element(mut self, id: i64, name: &str, x: f64, y: f64, z: f64) -> Self {
        self.elements.push(
            RigidBodyPose::at(Vector3::new(x, y, z)).with_id(id).with_type(1).with_name(name),
        );
        self
    }

    pub(crate) fn build(self) -> WorldSnapshot {
        let mut poses = vec![
            RigidBodyPose::at(self.body)
                .with_name("Body")
                .with_global_rotation(Vector3::new(0.0, self.heading, 0.0)),
        ];
        poses.extend(self.parts);
        let robot = RobotState::from_poses(self.profile, poses).unwrap();
        WorldSnapshot::new(
            robot,
            GameElementState::from_elements(self.profile, self.elements),
            self.game,
            self.gamepad,
            self.alliance,
        )
    }
}
