//! 进球口翻板控制
//!
//! 翻板只有一个"切换"按钮：目标位置与当前位置不同就按下，相同就松开。

use super::controls::RapidReactControls;
use crate::cache::GeometryCache;
use crate::geometry::IntakeSide;
use crate::mode::{CyclicMode, ModeSelector};
use crate::pipeline::Command;
use crate::region::{self, AllianceRegion};
use std::ops::Not;
use xrc_protocol::{PoseRole, RobotState};

/// 翻板位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePosition {
    Up,
    Unknown,
    Down,
}

impl IntakePosition {
    /// 由翻板局部高度判断位置（0.4 ~ 0.45 之间为运动中）
    pub fn from_y(y: f64) -> Self {
        if y > 0.45 {
            IntakePosition::Up
        } else if y < 0.4 {
            IntakePosition::Down
        } else {
            IntakePosition::Unknown
        }
    }

    /// 当前测量位置；缺少局部位置时为 `Unknown`
    pub fn measure(robot: &RobotState, side: IntakeSide) -> Self {
        let role = match side {
            IntakeSide::Left => PoseRole::LeftIntake,
            IntakeSide::Right => PoseRole::RightIntake,
        };
        robot
            .pose(role)
            .and_then(|p| p.local_position)
            .map(|p| IntakePosition::from_y(p.y))
            .unwrap_or(IntakePosition::Unknown)
    }
}

impl Not for IntakePosition {
    type Output = IntakePosition;

    fn not(self) -> Self::Output {
        match self {
            IntakePosition::Up => IntakePosition::Down,
            IntakePosition::Down => IntakePosition::Up,
            IntakePosition::Unknown => IntakePosition::Unknown,
        }
    }
}

/// 收球模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeMode {
    /// 瞄准时两侧抬起，收球时只放下靠近 cargo 的一侧
    TwoCargo,
    /// 两侧始终放下
    ThreeCargo,
}

impl CyclicMode for IntakeMode {
    const ALL: &'static [Self] = &[IntakeMode::TwoCargo, IntakeMode::ThreeCargo];

    fn name(self) -> &'static str {
        match self {
            IntakeMode::TwoCargo => "TWO_CARGO",
            IntakeMode::ThreeCargo => "THREE_CARGO",
        }
    }
}

/// 进球口命令
///
/// - `dpad_up` 选择 THREE_CARGO，`dpad_down` 选择 TWO_CARGO
/// - 终局阶段在本方机库内时两侧抬起
/// - 按住 `x` / `b` 时左 / 右侧目标取反
#[derive(Debug)]
pub struct IntakeCommand {
    mode: ModeSelector<IntakeMode, 2>,
    hangar: AllianceRegion,
}

impl IntakeCommand {
    pub fn new() -> Self {
        IntakeCommand {
            mode: ModeSelector::new(
                "intake mode",
                IntakeMode::ThreeCargo,
                [IntakeMode::ThreeCargo, IntakeMode::TwoCargo],
            ),
            hangar: region::rapid_react_hangar(),
        }
    }

    pub fn mode(&self) -> IntakeMode {
        self.mode.mode()
    }
}

impl Default for IntakeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command<RapidReactControls> for IntakeCommand {
    fn name(&self) -> &'static str {
        "intake"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut RapidReactControls) {
        use IntakePosition::{Down, Unknown, Up};

        let snapshot = cache.snapshot();
        let gamepad = snapshot.gamepad();
        self.mode.update([gamepad.dpad_up, gamepad.dpad_down]);

        let (mut left, mut right) = match self.mode.mode() {
            IntakeMode::TwoCargo if gamepad.bumper_right => (Up, Up),
            IntakeMode::TwoCargo if gamepad.bumper_left => match cache.nearest_piece() {
                Some(target) if target.side == IntakeSide::Left => (Down, Up),
                Some(_) => (Up, Down),
                None => (Unknown, Unknown),
            },
            IntakeMode::TwoCargo => (Unknown, Unknown),
            IntakeMode::ThreeCargo => (Down, Down),
        };

        let in_hangar = snapshot
            .robot()
            .body_position()
            .is_some_and(|p| self.hangar.contains(snapshot.alliance(), p));
        if snapshot.game().phase.is_endgame_like() && in_hangar {
            (left, right) = (Up, Up);
        }

        // 按住时反向
        if gamepad.x {
            left = !left;
        }
        if gamepad.b {
            right = !right;
        }

        if left != Unknown {
            controls.toggle_left_intake =
                left != IntakePosition::measure(snapshot.robot(), IntakeSide::Left);
        }
        if right != Unknown {
            controls.toggle_right_intake =
                right != IntakePosition::measure(snapshot.robot(), IntakeSide::Right);
        }
    }
}
