//! PID Controller - 比例-积分-微分控制器
//!
//! # 算法
//!
//! ```text
//! e        = setpoint - input
//! integral = clamp(integral + Ki * e * dt, min, max)
//! output   = clamp(Kp * e + integral - Kd * Δinput / dt, min, max)
//! ```
//!
//! # 特性
//!
//! - **积分饱和保护**: 积分项（已乘 Ki）被钳位到输出范围内
//! - **测量值微分**: 微分项基于输入变化而不是误差变化，设定值跳变不会产生尖峰；
//!   第一次调用时微分项为 0
//!
//! # 示例
//!
//! ```rust
//! use xrc_control::{Controller, PidController};
//! use std::time::Duration;
//!
//! let mut pid = PidController::new(0.0)
//!     .with_gains(0.1, 0.001, 0.0)
//!     .with_output_limit(4.0);
//!
//! let output = pid.tick(-20.0, Duration::from_secs(1)).unwrap();
//! assert!(output > 0.0);
//! ```

use crate::controller::Controller;
use crate::error::ControlError;
use std::time::Duration;

/// PID 控制器
#[derive(Debug, Clone)]
pub struct PidController {
    /// 设定值
    setpoint: f64,

    /// 比例增益 (Kp)
    kp: f64,

    /// 积分增益 (Ki)
    ki: f64,

    /// 微分增益 (Kd)
    kd: f64,

    /// 输出下限
    output_min: f64,

    /// 输出上限
    output_max: f64,

    /// 积分项累积值（已乘 Ki）
    integral: f64,

    /// 上一次输入（用于计算微分）
    last_input: Option<f64>,

    /// 上一次输出
    last_output: Option<f64>,
}

impl PidController {
    /// 创建新的 PID 控制器
    ///
    /// # 默认参数
    ///
    /// - Kp = 1.0, Ki = 0.0, Kd = 0.0
    /// - 输出不限幅
    pub fn new(setpoint: f64) -> Self {
        PidController {
            setpoint,
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            output_min: f64::NEG_INFINITY,
            output_max: f64::INFINITY,
            integral: 0.0,
            last_input: None,
            last_output: None,
        }
    }

    /// 设置 PID 增益
    pub fn with_gains(mut self, kp: f64, ki: f64, kd: f64) -> Self {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        self
    }

    /// 设置对称的输出限幅 `[-limit, limit]`
    pub fn with_output_limit(self, limit: f64) -> Self {
        self.with_output_limits(-limit.abs(), limit.abs())
    }

    /// 设置输出限幅 `[min, max]`
    pub fn with_output_limits(mut self, min: f64, max: f64) -> Self {
        self.output_min = min.min(max);
        self.output_max = max.max(min);
        self
    }

    /// 更新设定值
    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// 获取当前积分项
    ///
    /// 用于调试和监控。
    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn output_limits(&self) -> (f64, f64) {
        (self.output_min, self.output_max)
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.output_min, self.output_max)
    }
}

impl Controller for PidController {
    type Error = ControlError;

    fn tick(&mut self, input: f64, dt: Duration) -> Result<f64, Self::Error> {
        if !input.is_finite() {
            return Err(ControlError::NonFiniteInput(input));
        }

        let dt_sec = dt.as_secs_f64();

        // 防止除零
        if dt_sec <= 0.0 {
            tracing::warn!(
                "PID controller received zero dt: {:?}, returning last output",
                dt
            );
            return Ok(self.last_output.unwrap_or(0.0));
        }

        // 1. 计算误差
        let error = self.setpoint - input;

        // 2. 比例项（P）
        let p_term = self.kp * error;

        // 3. 积分项（I）+ 饱和保护
        self.integral = self.clamp(self.integral + self.ki * error * dt_sec);

        // 4. 微分项（D），基于测量值
        let d_term = match self.last_input {
            Some(last) => -self.kd * (input - last) / dt_sec,
            None => 0.0,
        };

        // 5. 钳位输出
        let output = self.clamp(p_term + self.integral + d_term);

        self.last_input = Some(input);
        self.last_output = Some(output);
        Ok(output)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.integral = 0.0;
        self.last_input = None;
        self.last_output = None;
        Ok(())
    }
}
