//! 自动射球
//!
//! 规则：持有三个 cargo 不得超过 1.625 s。计时器启动后剩余时间不足 0.25 s 时
//! 自动按下射球键，除非驾驶员开启了旁路。

use super::controls::RapidReactControls;
use crate::cache::GeometryCache;
use crate::pipeline::Command;
use crate::timer::DeadlineTimer;
use std::time::Duration;

/// 持有上限的时间限制
pub const THREE_CARGO_TIME_LIMIT: Duration = Duration::from_millis(1625);

/// 提前射球的余量
pub const SHOOT_MARGIN: Duration = Duration::from_millis(250);

/// 触发计时的持有数量
pub const CARGO_LIMIT: usize = 3;

/// 右摇杆 Y 低于此值开启旁路
const BYPASS_ENABLE: f64 = -0.9375;

/// 右摇杆 Y 高于此值关闭旁路
const BYPASS_DISABLE: f64 = 0.25;

/// 射球命令
#[derive(Debug)]
pub struct ShooterCommand {
    timer: DeadlineTimer,
    bypass: bool,
}

impl ShooterCommand {
    pub fn new() -> Self {
        ShooterCommand {
            timer: DeadlineTimer::new(THREE_CARGO_TIME_LIMIT, SHOOT_MARGIN),
            bypass: false,
        }
    }

    pub fn bypass_enabled(&self) -> bool {
        self.bypass
    }
}

impl Default for ShooterCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command<RapidReactControls> for ShooterCommand {
    fn name(&self) -> &'static str {
        "shooter"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut RapidReactControls) {
        let right_y = cache.snapshot().gamepad().right_y;
        if right_y < BYPASS_ENABLE && !self.bypass {
            tracing::info!("Bypassing cargo limit");
            self.bypass = true;
        } else if right_y > BYPASS_DISABLE && self.bypass {
            tracing::info!("Disabling cargo limit bypass");
            self.bypass = false;
        }

        let held = cache.pieces_in_robot().len();
        if self.timer.update(held >= CARGO_LIMIT, cache.now()) && !self.bypass {
            controls.shoot = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ControlLayout;
    use crate::test_support::rapid_react_snapshot;
    use std::time::Instant;
    use xrc_protocol::WorldSnapshot;

    fn run(command: &mut ShooterCommand, snapshot: &WorldSnapshot, now: Instant) -> bool {
        let cache = GeometryCache::at(snapshot, now);
        let mut controls = RapidReactControls::from_gamepad(snapshot.gamepad());
        command.execute(&cache, &mut controls);
        controls.shoot
    }

    fn holding(count: i64) -> crate::test_support::SnapshotBuilder {
        (0..count).fold(rapid_react_snapshot(), |b, id| b.element(id, "Ball_Red", 0.1, 0.1, 0.0))
    }

    #[test]
    fn test_shoots_before_deadline() {
        let mut command = ShooterCommand::new();
        let snapshot = holding(3).build();
        let t0 = Instant::now();

        assert!(!run(&mut command, &snapshot, t0));
        assert!(!run(&mut command, &snapshot, t0 + Duration::from_millis(1000)));
        assert!(run(&mut command, &snapshot, t0 + Duration::from_millis(1400)));
    }

    #[test]
    fn test_timer_resets_when_cargo_drops() {
        let mut command = ShooterCommand::new();
        let t0 = Instant::now();

        run(&mut command, &holding(3).build(), t0);
        run(&mut command, &holding(2).build(), t0 + Duration::from_millis(1000));
        // 重新计时
        assert!(!run(&mut command, &holding(3).build(), t0 + Duration::from_millis(1400)));
        assert!(!run(&mut command, &holding(3).build(), t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn test_bypass_latch() {
        let mut command = ShooterCommand::new();
        let t0 = Instant::now();

        let bypass = holding(3).gamepad(|g| g.right_y = -1.0).build();
        run(&mut command, &bypass, t0);
        assert!(command.bypass_enabled());

        // 回中不关闭旁路（迟滞）
        let neutral = holding(3).build();
        assert!(!run(&mut command, &neutral, t0 + Duration::from_millis(1500)));
        assert!(command.bypass_enabled());

        let disable = holding(3).gamepad(|g| g.right_y = 0.5).build();
        assert!(run(&mut command, &disable, t0 + Duration::from_millis(1600)));
        assert!(!command.bypass_enabled());
    }
}
