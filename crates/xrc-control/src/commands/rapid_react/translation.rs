//! 自动横移对准 cargo

use super::controls::RapidReactControls;
use crate::cache::GeometryCache;
use crate::geometry::IntakeSide;
use crate::pipeline::Command;

/// 左摇杆 X 超过此值视为驾驶员在手动横移
const MANUAL_STRAFE_DEADZONE: f64 = 0.1;

/// 方位角超过此值（度）时不横移，交给旋转
const MAX_BEARING_DEG: f64 = 30.0;

/// 距离小于此值（米）时不再横移
const MIN_DISTANCE: f64 = 0.625;

/// 按住左肩键收球时，横移到最近的 cargo 对准负责的进球口
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslationCommand;

impl Command<RapidReactControls> for TranslationCommand {
    fn name(&self) -> &'static str {
        "translation"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut RapidReactControls) {
        let gamepad = cache.snapshot().gamepad();
        if !gamepad.bumper_left || gamepad.left_x.abs() > MANUAL_STRAFE_DEADZONE {
            return;
        }

        let Some(target) = cache.nearest_piece() else {
            return;
        };
        if target.bearing_deg.abs() > MAX_BEARING_DEG || target.distance < MIN_DISTANCE {
            return;
        }

        controls.strafe = match target.side {
            IntakeSide::Left => -1.0,
            IntakeSide::Right => 1.0,
        };
    }
}
