//! 单个 tick 的完整快照

use crate::elements::GameElementState;
use crate::game::{Alliance, GameState};
use crate::gamepad::GamepadState;
use crate::robot::{RobotProfile, RobotState};
use crate::ProtocolError;
use std::fmt;

/// 三个状态文件的原始文本
#[derive(Debug, Clone, Copy)]
pub struct SnapshotTexts<'a> {
    /// `GAME_STATE.txt`
    pub game: &'a str,
    /// `GameElements.txt`
    pub elements: &'a str,
    /// `myRobot.txt`
    pub robot: &'a str,
}

/// 世界快照
///
/// 构造后不可变；所有命令在同一个 tick 内看到的是同一份快照。
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    robot: RobotState,
    elements: GameElementState,
    game: GameState,
    gamepad: GamepadState,
    alliance: Alliance,
}

impl WorldSnapshot {
    pub fn new(
        robot: RobotState,
        elements: GameElementState,
        game: GameState,
        gamepad: GamepadState,
        alliance: Alliance,
    ) -> Self {
        WorldSnapshot { robot, elements, game, gamepad, alliance }
    }

    /// 从三个状态文件的文本构造快照
    ///
    /// 联盟优先取机器人文件中的信息条目，否则使用 `fallback_alliance`（来自配置）。
    /// 任意一个文件解析失败，整个快照作废。
    pub fn parse(
        profile: RobotProfile,
        texts: SnapshotTexts<'_>,
        gamepad: GamepadState,
        fallback_alliance: Alliance,
    ) -> Result<Self, ProtocolError> {
        let game = GameState::parse(texts.game)?;
        let elements = GameElementState::parse(profile, texts.elements)?;
        let (robot, reported) = RobotState::parse(profile, texts.robot)?;

        Ok(WorldSnapshot {
            robot,
            elements,
            game,
            gamepad,
            alliance: reported.unwrap_or(fallback_alliance),
        })
    }

    pub fn robot(&self) -> &RobotState {
        &self.robot
    }

    pub fn elements(&self) -> &GameElementState {
        &self.elements
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn gamepad(&self) -> &GamepadState {
        &self.gamepad
    }

    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    pub fn profile(&self) -> RobotProfile {
        self.robot.profile()
    }
}

impl fmt::Display for WorldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}] {}", self.game, self.alliance, self.robot)?;
        write!(f, "{}", self.elements)
    }
}
