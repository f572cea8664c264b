//! 比赛状态：阶段、剩余时间、联盟

use crate::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 联盟
///
/// `Neither` 表示联盟未知：所有与联盟相关的区域判断都返回 false。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    #[default]
    Red,
    Blue,
    Neither,
}

impl FromStr for Alliance {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(Alliance::Red),
            "BLUE" => Ok(Alliance::Blue),
            "NEITHER" | "NONE" => Ok(Alliance::Neither),
            _ => Err(ProtocolError::InvalidAlliance(s.to_string())),
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::Red => write!(f, "RED"),
            Alliance::Blue => write!(f, "BLUE"),
            Alliance::Neither => write!(f, "NEITHER"),
        }
    }
}

/// 比赛阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Ready,
    Auto,
    Teleop,
    Endgame,
    Finished,
}

impl GamePhase {
    /// 仿真器中的文本表示
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Ready => "READY",
            GamePhase::Auto => "AUTO",
            GamePhase::Teleop => "TELEOP",
            GamePhase::Endgame => "ENDGAME",
            GamePhase::Finished => "FINISHED",
        }
    }

    /// 是否处于"可以进入机库爬升"的阶段
    ///
    /// 包括 `Ready` 与 `Finished`：比赛前后机器人停在机库内时也保持爬升姿态。
    pub fn is_endgame_like(self) -> bool {
        matches!(self, GamePhase::Ready | GamePhase::Endgame | GamePhase::Finished)
    }
}

impl FromStr for GamePhase {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "READY" => Ok(GamePhase::Ready),
            "AUTO" => Ok(GamePhase::Auto),
            "TELEOP" => Ok(GamePhase::Teleop),
            "ENDGAME" => Ok(GamePhase::Endgame),
            "FINISHED" => Ok(GamePhase::Finished),
            other => Err(ProtocolError::InvalidPhase(other.to_string())),
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 比赛状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    /// 当前阶段剩余时间（秒）
    pub time_left: f64,
}

impl GameState {
    /// 解析 `GAME_STATE.txt`
    ///
    /// 格式：
    ///
    /// ```text
    /// TELEOP
    /// timeleft=97.25
    /// ```
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let mut lines = text.lines();

        let phase_line = lines
            .next()
            .ok_or_else(|| ProtocolError::InvalidGameState("empty game state".to_string()))?;
        let phase = phase_line.parse::<GamePhase>()?;

        let time_line = lines
            .next()
            .ok_or_else(|| ProtocolError::InvalidGameState("missing time line".to_string()))?;
        let (_, value) = time_line.split_once('=').ok_or_else(|| {
            ProtocolError::InvalidGameState(format!("time line has no '=': {:?}", time_line))
        })?;
        let time_left = value.trim().parse::<f64>().map_err(|e| {
            ProtocolError::InvalidGameState(format!("invalid time {:?}: {}", value.trim(), e))
        })?;

        Ok(GameState { phase, time_left })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.phase, self.time_left)
    }
}
