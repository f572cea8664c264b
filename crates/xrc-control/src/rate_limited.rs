//! 限频控制器
//!
//! 管线的调用频率（100 Hz 以上）远高于执行器的响应速度。如果每次调用都以抖动的
//! 实际时间步长重新计算积分/微分项，按固定步长整定的增益就会失效。
//!
//! `RateLimitedController` 把"重新计算"与"调用"解耦：
//!
//! - 输入与上一次**完全相同**且距上次计算不足 `refresh_interval`：
//!   直接返回缓存输出，不修改任何状态
//! - 否则：以**固定的标称步长** `nominal_dt`（不是实际经过时间）调用内部控制器，
//!   缓存输出/输入/时间戳
//!
//! 输出始终被钳位到配置的范围内。

use crate::controller::Controller;
use crate::error::ControlError;
use crate::pid::PidController;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// 默认刷新间隔（毫秒）
pub const DEFAULT_REFRESH_INTERVAL_MS: f64 = 187.5;

/// 默认标称步长（秒）
pub const DEFAULT_NOMINAL_DT_S: f64 = 1.0;

/// 限频控制器参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// 相同输入的最小重新计算间隔（毫秒）
    pub refresh_interval_ms: f64,

    /// 传给内部控制器的固定步长（秒）
    pub nominal_dt_s: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            nominal_dt_s: DEFAULT_NOMINAL_DT_S,
        }
    }
}

impl ControllerSettings {
    /// 校验参数
    pub fn validate(&self) -> Result<(), ControlError> {
        if !self.refresh_interval_ms.is_finite() || self.refresh_interval_ms < 0.0 {
            return Err(ControlError::InvalidSettings(format!(
                "refresh_interval_ms must be >= 0, got {}",
                self.refresh_interval_ms
            )));
        }
        if !self.nominal_dt_s.is_finite() || self.nominal_dt_s <= 0.0 {
            return Err(ControlError::InvalidSettings(format!(
                "nominal_dt_s must be > 0, got {}",
                self.nominal_dt_s
            )));
        }
        Ok(())
    }

    /// 刷新间隔；参数无效时回退到默认值
    pub fn refresh_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.refresh_interval_ms / 1000.0)
            .unwrap_or(Duration::from_micros(187_500))
    }

    /// 标称步长；参数无效时回退到默认值
    pub fn nominal_dt(&self) -> Duration {
        match Duration::try_from_secs_f64(self.nominal_dt_s) {
            Ok(dt) if !dt.is_zero() => dt,
            _ => Duration::from_secs(1),
        }
    }
}

/// 上一次实际计算
#[derive(Debug, Clone, Copy)]
struct LastComputation {
    input: f64,
    output: f64,
    at: Instant,
}

/// 限频控制器
#[derive(Debug, Clone)]
pub struct RateLimitedController<C = PidController> {
    inner: C,
    refresh_interval: Duration,
    nominal_dt: Duration,
    output_min: f64,
    output_max: f64,
    last: Option<LastComputation>,
}

impl RateLimitedController<PidController> {
    /// 创建以 PID 为内核的限频控制器（设定值 0，输入即误差）
    ///
    /// 输出范围为 `[-limit, limit]`，同时作用于 PID 内部的积分限幅。
    pub fn pid(kp: f64, ki: f64, kd: f64, limit: f64, settings: &ControllerSettings) -> Self {
        let pid = PidController::new(0.0).with_gains(kp, ki, kd).with_output_limit(limit);
        RateLimitedController::new(pid, settings).with_output_limit(limit)
    }
}

impl<C: Controller> RateLimitedController<C> {
    pub fn new(inner: C, settings: &ControllerSettings) -> Self {
        RateLimitedController {
            inner,
            refresh_interval: settings.refresh_interval(),
            nominal_dt: settings.nominal_dt(),
            output_min: f64::NEG_INFINITY,
            output_max: f64::INFINITY,
            last: None,
        }
    }

    /// 设置对称的输出限幅 `[-limit, limit]`
    pub fn with_output_limit(mut self, limit: f64) -> Self {
        self.output_min = -limit.abs();
        self.output_max = limit.abs();
        self
    }

    /// 以当前时间计算一步
    pub fn step(&mut self, input: f64) -> Result<f64, C::Error> {
        self.step_at(input, Instant::now())
    }

    /// 以给定时间计算一步（测试用显式时间）
    pub fn step_at(&mut self, input: f64, now: Instant) -> Result<f64, C::Error> {
        if let Some(last) = self.last
            && last.input == input
            && now.saturating_duration_since(last.at) < self.refresh_interval
        {
            return Ok(last.output);
        }

        let output = self
            .inner
            .tick(input, self.nominal_dt)?
            .clamp(self.output_min, self.output_max);
        self.last = Some(LastComputation { input, output, at: now });
        Ok(output)
    }

    /// 内部控制器
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// 清除缓存与内部控制器状态
    pub fn reset(&mut self) -> Result<(), C::Error> {
        self.last = None;
        self.inner.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> RateLimitedController {
        RateLimitedController::pid(0.1, 0.001, 0.0, 4.0, &ControllerSettings::default())
    }

    #[test]
    fn test_settings_default() {
        let settings = ControllerSettings::default();
        assert_eq!(settings.refresh_interval(), Duration::from_micros(187_500));
        assert_eq!(settings.nominal_dt(), Duration::from_secs(1));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validate() {
        let bad = ControllerSettings { nominal_dt_s: 0.0, ..Default::default() };
        assert!(bad.validate().is_err());
        // 无效参数的访问器回退到默认值
        assert_eq!(bad.nominal_dt(), Duration::from_secs(1));

        let bad = ControllerSettings { refresh_interval_ms: -1.0, ..Default::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_cached_within_interval() {
        let mut c = controller();
        let t0 = Instant::now();

        let first = c.step_at(-20.0, t0).unwrap();
        let integral = c.inner().integral();
        let second = c.step_at(-20.0, t0 + Duration::from_millis(100)).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
        // 缓存路径不累积积分
        assert_eq!(c.inner().integral(), integral);
    }

    #[test]
    fn test_recomputes_after_interval() {
        let mut c = controller();
        let t0 = Instant::now();

        c.step_at(-20.0, t0).unwrap();
        let integral = c.inner().integral();
        c.step_at(-20.0, t0 + Duration::from_millis(200)).unwrap();

        assert!(c.inner().integral() > integral);
    }

    #[test]
    fn test_recomputes_on_changed_input() {
        let mut c = controller();
        let t0 = Instant::now();

        let first = c.step_at(-20.0, t0).unwrap();
        let second = c.step_at(-10.0, t0 + Duration::from_millis(1)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_output_clamped() {
        let mut c = controller();
        let output = c.step_at(-1000.0, Instant::now()).unwrap();
        assert_eq!(output, 4.0);
    }

    #[test]
    fn test_configurable_interval() {
        let settings = ControllerSettings { refresh_interval_ms: 10.0, ..Default::default() };
        let mut c = RateLimitedController::pid(0.0, 1.0, 0.0, 100.0, &settings);
        let t0 = Instant::now();

        c.step_at(-1.0, t0).unwrap();
        c.step_at(-1.0, t0 + Duration::from_millis(20)).unwrap();

        // 两次都真正计算：积分 = 1.0 * 1.0 * 1.0 * 2
        assert!((c.inner().integral() - 2.0).abs() < 1e-10);
    }
}
