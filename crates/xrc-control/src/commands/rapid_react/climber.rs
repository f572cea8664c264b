//! 爬升臂与爬升钩
//!
//! 终局阶段在本方机库内伸出爬升臂，并把钩子转到 65°；其余时候收回、钩子归零。
//! 车体被抬离地面后自动持续正转完成爬升。

use super::controls::RapidReactControls;
use crate::actuator;
use crate::cache::GeometryCache;
use crate::pipeline::Command;
use crate::rate_limited::{ControllerSettings, RateLimitedController};
use crate::region::{self, AllianceRegion};
use xrc_protocol::PoseRole;

/// 机库内的钩子目标角度（度）
pub const HOOK_CLIMB_ANGLE: f64 = 65.0;

/// 车体高度处于此区间时视为正在爬升
const CLIMBING_HEIGHT: (f64, f64) = (0.25, 0.75);

/// 车体低于此高度时才调整钩子角度
const HOOK_CONTROL_HEIGHT: f64 = 0.625;

/// 钩子角度折叠到 [-90, 90]
///
/// 钩子是对称的，相差 180° 的两个姿态等价。
pub fn fold_hook_angle(raw: f64) -> f64 {
    let mut angle = if raw > 180.0 { raw - 360.0 } else { raw };
    if angle < -90.0 {
        angle += 180.0;
    } else if angle > 90.0 {
        angle -= 180.0;
    }
    angle
}

/// 爬升命令
#[derive(Debug)]
pub struct ClimberCommand {
    controller: RateLimitedController,
    hangar: AllianceRegion,
}

impl ClimberCommand {
    pub fn new(settings: &ControllerSettings) -> Self {
        ClimberCommand {
            controller: RateLimitedController::pid(-0.1, 0.0, 0.0, 1.0, settings),
            hangar: region::rapid_react_hangar(),
        }
    }
}

impl Command<RapidReactControls> for ClimberCommand {
    fn name(&self) -> &'static str {
        "climber"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut RapidReactControls) {
        let snapshot = cache.snapshot();
        let Some(body) = snapshot.robot().body_position() else {
            return;
        };

        let in_hangar = self.hangar.contains(snapshot.alliance(), body);
        let target = if snapshot.game().phase.is_endgame_like() && in_hangar {
            controls.climber_extend = true;
            HOOK_CLIMB_ANGLE
        } else {
            controls.climber_retract = true;
            0.0
        };

        if actuator::manual_override(controls.climber_forward, controls.climber_reverse) {
            return;
        }

        let (low, high) = CLIMBING_HEIGHT;
        if body.y > low && body.y < high {
            controls.climber_forward = 1.0;
        } else if body.y < HOOK_CONTROL_HEIGHT {
            let Some(raw) = snapshot
                .robot()
                .pose(PoseRole::ClimberHook1)
                .and_then(|p| p.local_rotation)
                .map(|r| r.z)
            else {
                return;
            };

            let error = target - fold_hook_angle(raw);
            match self.controller.step_at(error, cache.now()) {
                Ok(output) => actuator::apply_split(
                    &mut controls.climber_forward,
                    &mut controls.climber_reverse,
                    output,
                ),
                Err(e) => tracing::warn!("Climber controller rejected input: {}", e),
            }
        }
    }
}
