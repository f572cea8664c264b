//! 自动转向

use super::controls::RapidReactControls;
use crate::cache::GeometryCache;
use crate::pipeline::Command;
use crate::rate_limited::{ControllerSettings, RateLimitedController};

/// 按住右肩键转向 Hub，按住左肩键转向最近的 cargo
///
/// 没有目标时保持右摇杆 X 的手动输入。
#[derive(Debug)]
pub struct RotationCommand {
    controller: RateLimitedController,
}

impl RotationCommand {
    pub fn new(settings: &ControllerSettings) -> Self {
        RotationCommand {
            controller: RateLimitedController::pid(-0.022, 0.0, -0.002, 1.0, settings),
        }
    }
}

impl Command<RapidReactControls> for RotationCommand {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut RapidReactControls) {
        let gamepad = cache.snapshot().gamepad();
        let target = if gamepad.bumper_right {
            cache.angle_to_hub()
        } else if gamepad.bumper_left {
            cache.nearest_piece().map(|p| p.bearing_deg)
        } else {
            None
        };

        let Some(angle) = target else {
            return;
        };
        match self.controller.step_at(angle, cache.now()) {
            Ok(rotation) => controls.rotate = rotation,
            Err(e) => tracing::warn!("Rotation controller rejected input: {}", e),
        }
    }
}
