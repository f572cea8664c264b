//! Rapid React 控制布局

use crate::pipeline::ControlLayout;
use xrc_protocol::output::DEFAULT_PRECISION;
use xrc_protocol::{ControlOutput, GamepadState};

/// Rapid React 语义控制记录
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RapidReactControls {
    pub reverse_intake: bool,
    pub toggle_right_intake: bool,
    pub toggle_left_intake: bool,
    pub shoot: bool,
    pub aim_down: bool,
    pub aim_up: bool,
    pub climber_extend: bool,
    pub climber_retract: bool,
    pub precision_left: bool,
    pub precision_right: bool,
    pub stop: bool,
    pub restart: bool,
    pub right_y: f64,
    pub rotate: f64,
    pub forward_reverse: f64,
    pub strafe: f64,
    pub climber_reverse: f64,
    pub climber_forward: f64,
    pub precision: f64,
}

impl ControlLayout for RapidReactControls {
    fn from_gamepad(g: &GamepadState) -> Self {
        RapidReactControls {
            reverse_intake: g.a,
            toggle_right_intake: g.b,
            toggle_left_intake: g.x,
            shoot: g.y,
            aim_down: g.dpad_down,
            aim_up: g.dpad_up,
            climber_extend: g.dpad_right,
            climber_retract: g.dpad_left,
            precision_left: g.bumper_left,
            precision_right: g.bumper_right,
            stop: g.start,
            restart: g.back,
            right_y: g.right_y,
            rotate: g.right_x,
            forward_reverse: g.left_y,
            strafe: g.left_x,
            climber_reverse: g.trigger_left,
            climber_forward: g.trigger_right,
            precision: DEFAULT_PRECISION,
        }
    }

    fn to_output(&self) -> ControlOutput {
        ControlOutput {
            a: self.reverse_intake,
            b: self.toggle_right_intake,
            x: self.toggle_left_intake,
            y: self.shoot,
            dpad_down: self.aim_down,
            dpad_up: self.aim_up,
            dpad_left: self.climber_retract,
            dpad_right: self.climber_extend,
            bumper_l: self.precision_left,
            bumper_r: self.precision_right,
            stop: self.stop,
            restart: self.restart,
            right_y: self.right_y,
            right_x: self.rotate,
            left_y: self.forward_reverse,
            left_x: self.strafe,
            trigger_l: self.climber_reverse,
            trigger_r: self.climber_forward,
            precision: self.precision,
        }
    }
}
