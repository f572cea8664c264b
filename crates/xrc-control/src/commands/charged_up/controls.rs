//! Charged Up 控制布局

use crate::pipeline::ControlLayout;
use xrc_protocol::output::DEFAULT_PRECISION;
use xrc_protocol::{ControlOutput, GamepadState};

/// Charged Up 语义控制记录
///
/// 四个机械臂预设按钮（`stow_arm` / `station_arm` / `high_arm` / `mid_arm`）
/// 由 [`ArmCommand`](super::ArmCommand) 接管，下游永远看不到它们被按下。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargedUpControls {
    pub reverse_intake: bool,
    pub slide_out: bool,
    pub slide_in: bool,
    pub toggle_climb: bool,
    pub stow_arm: bool,
    pub station_arm: bool,
    pub high_arm: bool,
    pub mid_arm: bool,
    pub bumper_left: bool,
    pub bumper_right: bool,
    pub stop: bool,
    pub restart: bool,
    pub right_y: f64,
    pub rotate: f64,
    pub forward_reverse: f64,
    pub strafe: f64,
    pub elevator_down: f64,
    pub elevator_up: f64,
    pub precision: f64,
}

impl ControlLayout for ChargedUpControls {
    fn from_gamepad(g: &GamepadState) -> Self {
        ChargedUpControls {
            reverse_intake: g.a,
            slide_out: g.b,
            slide_in: g.x,
            toggle_climb: g.y,
            stow_arm: g.dpad_down,
            station_arm: g.dpad_up,
            high_arm: g.dpad_right,
            mid_arm: g.dpad_left,
            bumper_left: g.bumper_left,
            bumper_right: g.bumper_right,
            stop: g.start,
            restart: g.back,
            right_y: g.right_y,
            rotate: g.right_x,
            forward_reverse: g.left_y,
            strafe: g.left_x,
            elevator_down: g.trigger_left,
            elevator_up: g.trigger_right,
            precision: DEFAULT_PRECISION,
        }
    }

    fn to_output(&self) -> ControlOutput {
        ControlOutput {
            a: self.reverse_intake,
            b: self.slide_out,
            x: self.slide_in,
            y: self.toggle_climb,
            dpad_down: self.stow_arm,
            dpad_up: self.station_arm,
            dpad_left: self.mid_arm,
            dpad_right: self.high_arm,
            bumper_l: self.bumper_left,
            bumper_r: self.bumper_right,
            stop: self.stop,
            restart: self.restart,
            right_y: self.right_y,
            right_x: self.rotate,
            left_y: self.forward_reverse,
            left_x: self.strafe,
            trigger_l: self.elevator_down,
            trigger_r: self.elevator_up,
            precision: self.precision,
        }
    }
}
