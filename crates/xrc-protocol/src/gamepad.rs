//! 手柄输入状态

use crate::ProtocolError;
use serde::{Deserialize, Serialize};

/// 手柄状态
///
/// 摇杆轴范围 [-1, 1]，扳机轴范围 [0, 1]。`Default` 是"无设备"时的中立状态。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GamepadState {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub dpad_down: bool,
    pub dpad_up: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub bumper_left: bool,
    pub bumper_right: bool,
    pub back: bool,
    pub start: bool,
    pub right_y: f64,
    pub right_x: f64,
    pub left_y: f64,
    pub left_x: f64,
    pub trigger_left: f64,
    pub trigger_right: f64,
}

impl GamepadState {
    /// 解析 `key=value` 文本（每行一项，`#` 开头为注释）
    ///
    /// 按钮接受 `0/1/true/false`；未出现的键保持中立值。
    /// 轴值会被钳位到各自的合法范围；`NaN`/`inf` 视为无效行。
    pub fn parse_kv(text: &str) -> Result<Self, ProtocolError> {
        let mut state = GamepadState::default();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| ProtocolError::InvalidGamepadLine(line.to_string()))?;
            let (key, value) = (key.trim(), value.trim());

            let button = || match value {
                "1" | "true" => Ok(true),
                "0" | "false" => Ok(false),
                _ => Err(ProtocolError::InvalidGamepadLine(line.to_string())),
            };
            let axis = |lo: f64| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| v.clamp(lo, 1.0))
                    .ok_or_else(|| ProtocolError::InvalidGamepadLine(line.to_string()))
            };

            match key {
                "a" => state.a = button()?,
                "b" => state.b = button()?,
                "x" => state.x = button()?,
                "y" => state.y = button()?,
                "dpad_down" => state.dpad_down = button()?,
                "dpad_up" => state.dpad_up = button()?,
                "dpad_left" => state.dpad_left = button()?,
                "dpad_right" => state.dpad_right = button()?,
                "bumper_left" => state.bumper_left = button()?,
                "bumper_right" => state.bumper_right = button()?,
                "back" => state.back = button()?,
                "start" => state.start = button()?,
                "right_y" => state.right_y = axis(-1.0)?,
                "right_x" => state.right_x = axis(-1.0)?,
                "left_y" => state.left_y = axis(-1.0)?,
                "left_x" => state.left_x = axis(-1.0)?,
                "trigger_left" => state.trigger_left = axis(0.0)?,
                "trigger_right" => state.trigger_right = axis(0.0)?,
                _ => return Err(ProtocolError::InvalidGamepadLine(line.to_string())),
            }
        }

        Ok(state)
    }
}
