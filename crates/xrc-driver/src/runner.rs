//! Loop Runner - 自动化循环
//!
//! 固定频率执行：获取快照 → 管线 → 发布输出。
//!
//! # 节拍
//!
//! - 每个 tick 只处理一个快照，不跳帧、不合并
//! - 用 `spin_sleep` 睡过本周期剩余的时间
//! - 超时（处理时间超过周期）只记录 `debug!`，下一个 tick 立即开始
//!
//! # 错误处理
//!
//! 快照不完整或输出写入失败只丢弃当前 tick，下一个 tick 重试；
//! 配置错误直接返回。
//!
//! # 使用场景
//!
//! ```rust,ignore
//! use std::sync::atomic::AtomicBool;
//! use xrc_control::{ControllerSettings, commands};
//! use xrc_driver::{FileControlSink, FileSnapshotSource, LoopConfig, NullGamepad, run_automation};
//! use xrc_protocol::{Alliance, RobotProfile};
//!
//! let profile = RobotProfile::ChargedUp;
//! let mut source = FileSnapshotSource::new(".", profile, Alliance::Red, NullGamepad);
//! let mut automation = commands::pipeline_for(profile, &ControllerSettings::default());
//! let mut sink = FileControlSink::new("Controls.txt");
//! let stop = AtomicBool::new(false);
//!
//! let stats = run_automation(
//!     &mut source,
//!     automation.as_mut(),
//!     &mut sink,
//!     &mut (),
//!     &LoopConfig::default(),
//!     &stop,
//! )?;
//! ```

use crate::error::DriverError;
use crate::sink::ControlSink;
use crate::source::SnapshotSource;
use spin_sleep::SpinSleeper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use xrc_control::Automation;
use xrc_protocol::{ControlOutput, WorldSnapshot};

/// 循环配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// 执行频率（Hz）
    pub frequency_hz: f64,

    /// 最大 tick 数（None 表示直到收到停止信号）
    ///
    /// 被丢弃的 tick 也计入。
    pub max_iterations: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            frequency_hz: 100.0,
            max_iterations: None,
        }
    }
}

impl LoopConfig {
    /// 校验配置，返回标称周期
    pub fn period(&self) -> Result<Duration, DriverError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(DriverError::ConfigError(format!(
                "Invalid frequency_hz: {} (must be > 0)",
                self.frequency_hz
            )));
        }
        if self.frequency_hz > 10000.0 {
            tracing::warn!(
                "Very high loop frequency: {} Hz. Tick overruns are likely.",
                self.frequency_hz
            );
        }
        match Duration::try_from_secs_f64(1.0 / self.frequency_hz) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(DriverError::ConfigError(format!(
                "frequency_hz {} gives no representable period",
                self.frequency_hz
            ))),
        }
    }
}

/// 循环统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// 成功发布输出的 tick 数
    pub completed: u64,
    /// 被丢弃的 tick 数
    pub discarded: u64,
    /// 处理时间超过周期的 tick 数
    pub overruns: u64,
    /// 单个 tick 的最长处理时间
    pub max_tick: Duration,
}

impl LoopStats {
    /// 总 tick 数
    pub fn ticks(&self) -> u64 {
        self.completed + self.discarded
    }
}

/// 每个成功 tick 之后的回调（例如写 tick 日志）
pub trait TickObserver {
    fn on_tick(&mut self, snapshot: &WorldSnapshot, output: &ControlOutput);
}

/// 不做任何事
impl TickObserver for () {
    fn on_tick(&mut self, _snapshot: &WorldSnapshot, _output: &ControlOutput) {}
}

impl<F: FnMut(&WorldSnapshot, &ControlOutput)> TickObserver for F {
    fn on_tick(&mut self, snapshot: &WorldSnapshot, output: &ControlOutput) {
        self(snapshot, output)
    }
}

/// 运行自动化循环
///
/// 阻塞直到：
/// - `stop` 被置位（Ctrl+C）
/// - 达到 `max_iterations`
/// - 发生非暂时性错误
pub fn run_automation<S, A, K, O>(
    source: &mut S,
    automation: &mut A,
    sink: &mut K,
    observer: &mut O,
    config: &LoopConfig,
    stop: &AtomicBool,
) -> Result<LoopStats, DriverError>
where
    S: SnapshotSource + ?Sized,
    A: Automation + ?Sized,
    K: ControlSink + ?Sized,
    O: TickObserver + ?Sized,
{
    let period = config.period()?;
    if source.profile() != automation.profile() {
        return Err(DriverError::ConfigError(format!(
            "Snapshot source profile {} does not match automation profile {}",
            source.profile(),
            automation.profile()
        )));
    }

    let sleeper = SpinSleeper::default();
    let mut stats = LoopStats::default();
    tracing::info!(
        profile = %automation.profile(),
        "Automation loop started at {} Hz",
        config.frequency_hz
    );

    loop {
        if stop.load(Ordering::Relaxed) {
            tracing::info!("Stop requested");
            break;
        }
        if let Some(max_iter) = config.max_iterations
            && stats.ticks() >= max_iter
        {
            break;
        }

        let start = Instant::now();
        match run_tick(source, automation, sink, start) {
            Ok((snapshot, output)) => {
                observer.on_tick(&snapshot, &output);
                stats.completed += 1;
            },
            Err(e) if e.is_transient() => {
                tracing::debug!("Discarding tick: {}", e);
                stats.discarded += 1;
            },
            Err(e) => return Err(e),
        }

        let elapsed = start.elapsed();
        stats.max_tick = stats.max_tick.max(elapsed);
        if elapsed < period {
            sleeper.sleep(period - elapsed);
        } else {
            stats.overruns += 1;
            tracing::debug!(?elapsed, ?period, "Tick overrun");
        }
    }

    tracing::info!(
        completed = stats.completed,
        discarded = stats.discarded,
        overruns = stats.overruns,
        "Automation loop finished"
    );
    Ok(stats)
}

fn run_tick<S, A, K>(
    source: &mut S,
    automation: &mut A,
    sink: &mut K,
    now: Instant,
) -> Result<(WorldSnapshot, ControlOutput), DriverError>
where
    S: SnapshotSource + ?Sized,
    A: Automation + ?Sized,
    K: ControlSink + ?Sized,
{
    let snapshot = source.acquire()?;
    let output = automation.run_at(&snapshot, now);
    sink.publish(&output)?;
    Ok((snapshot, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrc_control::{ControllerSettings, commands};
    use xrc_protocol::{
        Alliance, GameElementState, GamePhase, GameState, GamepadState, ProtocolError,
        RigidBodyPose, RobotProfile, RobotState, Vector3,
    };

    /// 每隔 `fail_every` 次返回一次不完整快照
    struct FlakySource {
        calls: u64,
        fail_every: u64,
    }

    impl SnapshotSource for FlakySource {
        fn profile(&self) -> RobotProfile {
            RobotProfile::ChargedUp
        }

        fn acquire(&mut self) -> Result<WorldSnapshot, DriverError> {
            self.calls += 1;
            if self.fail_every > 0 && self.calls % self.fail_every == 0 {
                return Err(ProtocolError::MissingRobotInfo.into());
            }
            let part = |name: &str| RigidBodyPose::at(Vector3::ZERO).with_name(name);
            let robot = RobotState::from_poses(
                RobotProfile::ChargedUp,
                vec![
                    part("Body"),
                    part("Lift").with_local_position(Vector3::new(0.0, 0.130, 0.0)),
                    part("Slide").with_local_position(Vector3::new(0.0, 0.417, 0.0)),
                ],
            )
            .unwrap();
            Ok(WorldSnapshot::new(
                robot,
                GameElementState::from_elements(RobotProfile::ChargedUp, Vec::new()),
                GameState { phase: GamePhase::Teleop, time_left: 60.0 },
                GamepadState { a: true, ..Default::default() },
                Alliance::Red,
            ))
        }
    }

    fn fast(max_iterations: u64) -> LoopConfig {
        LoopConfig { frequency_hz: 2000.0, max_iterations: Some(max_iterations) }
    }

    #[test]
    fn test_loop_config_validation() {
        assert!(LoopConfig::default().period().is_ok());
        assert!(LoopConfig { frequency_hz: 0.0, max_iterations: None }.period().is_err());
        assert!(LoopConfig { frequency_hz: f64::NAN, max_iterations: None }.period().is_err());

        // 周期溢出或为零时返回配置错误
        for hz in [1e-300, f64::MIN_POSITIVE, 1e300] {
            let err = LoopConfig { frequency_hz: hz, max_iterations: None }.period().unwrap_err();
            assert!(matches!(err, DriverError::ConfigError(_)), "{}", hz);
        }
    }

    #[test]
    fn test_discards_and_retries() {
        let mut source = FlakySource { calls: 0, fail_every: 3 };
        let mut automation =
            commands::pipeline_for(RobotProfile::ChargedUp, &ControllerSettings::default());
        let mut sink: Vec<ControlOutput> = Vec::new();
        let mut observed = 0;
        let stop = AtomicBool::new(false);

        let stats = run_automation(
            &mut source,
            automation.as_mut(),
            &mut sink,
            &mut |_: &WorldSnapshot, _: &ControlOutput| observed += 1,
            &fast(9),
            &stop,
        )
        .unwrap();

        assert_eq!(stats.ticks(), 9);
        assert_eq!(stats.discarded, 3);
        assert_eq!(stats.completed, 6);
        assert_eq!(sink.len(), 6);
        assert_eq!(observed, 6);
        assert!(sink.iter().all(|o| o.a));
    }

    #[test]
    fn test_stop_flag() {
        let mut source = FlakySource { calls: 0, fail_every: 0 };
        let mut automation =
            commands::pipeline_for(RobotProfile::ChargedUp, &ControllerSettings::default());
        let mut sink: Vec<ControlOutput> = Vec::new();
        let stop = AtomicBool::new(true);

        let stats =
            run_automation(&mut source, automation.as_mut(), &mut sink, &mut (), &fast(100), &stop)
                .unwrap();
        assert_eq!(stats.ticks(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_profile_mismatch() {
        let mut source = FlakySource { calls: 0, fail_every: 0 };
        let mut automation =
            commands::pipeline_for(RobotProfile::RapidReact, &ControllerSettings::default());
        let mut sink: Vec<ControlOutput> = Vec::new();
        let stop = AtomicBool::new(false);

        let err =
            run_automation(&mut source, automation.as_mut(), &mut sink, &mut (), &fast(1), &stop)
                .unwrap_err();
        assert!(matches!(err, DriverError::ConfigError(_)));
    }
}
