//! 射球罩角度
//!
//! 目标角度按到 Hub 的距离查表：每 0.1 m 一档，从 1.3 m 开始。

use super::controls::RapidReactControls;
use crate::cache::GeometryCache;
use crate::pipeline::Command;
use crate::rate_limited::{ControllerSettings, RateLimitedController};
use xrc_protocol::PoseRole;

/// 射球罩目标角度表（度）
pub const HOOD_ANGLES: [f64; 35] = [
    165.0, 155.0, 147.0, 145.0, 140.0, //
    136.0, 127.0, 125.0, 120.0, 117.0, //
    110.0, 107.0, 102.0, 99.0, 94.0, //
    90.0, 86.0, 81.0, 77.0, 73.0, //
    69.0, 65.0, 60.0, 41.0, 40.0, //
    38.0, 35.0, 33.0, 31.0, 29.0, //
    27.0, 25.0, 22.5, 20.0, 0.0,
];

/// 查表起点距离（米）
const TABLE_START: f64 = 1.3;

/// 距离对应的目标角度
pub fn target_hood_angle(distance: f64) -> f64 {
    // `as` 向零截断，NaN 转为 0
    let index = ((distance - TABLE_START) * 10.0) as i64;
    HOOD_ANGLES[index.clamp(0, HOOD_ANGLES.len() as i64 - 1) as usize]
}

/// 由 `Indicator` 局部欧拉角 X 换算射球罩角度
pub fn measured_hood_angle(raw: f64) -> f64 {
    if raw >= 270.0 {
        450.0 - raw
    } else if raw <= 90.0 {
        90.0 - raw
    } else {
        raw
    }
}

/// 射球罩命令
///
/// 输出通过精细控制量表达：`aim_up` / `aim_down` 给方向，`precision` 给幅度。
#[derive(Debug)]
pub struct HoodCommand {
    controller: RateLimitedController,
}

impl HoodCommand {
    pub fn new(settings: &ControllerSettings) -> Self {
        HoodCommand { controller: RateLimitedController::pid(0.1, 0.001, 0.0, 4.0, settings) }
    }
}

impl Command<RapidReactControls> for HoodCommand {
    fn name(&self) -> &'static str {
        "hood"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut RapidReactControls) {
        let Some(distance) = cache.distance_to_hub() else {
            return;
        };
        let Some(raw) = cache
            .snapshot()
            .robot()
            .pose(PoseRole::Hood)
            .and_then(|p| p.local_rotation)
            .map(|r| r.x)
        else {
            return;
        };

        let difference = target_hood_angle(distance) - measured_hood_angle(raw);
        let output = match self.controller.step_at(difference, cache.now()) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Hood controller rejected input: {}", e);
                return;
            },
        };

        controls.aim_up = output < 0.0;
        controls.aim_down = output > 0.0;
        controls.precision_left = true;
        controls.precision_right = true;
        controls.precision = output.abs();
    }
}
