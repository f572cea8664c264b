//! 截止时间计时器
//!
//! "持有 N 个元素后必须在限定时间内处理"的规则：
//!
//! ```text
//!          达到阈值                    剩余时间 < margin
//!   Idle ──────────────▶ Armed(start) ─────────────────▶ 触发（每 tick）
//!    ▲                      │
//!    └──────────────────────┘
//!          低于阈值
//! ```

use std::time::{Duration, Instant};

/// 计时器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Armed(Instant),
}

/// 截止时间计时器
#[derive(Debug, Clone)]
pub struct DeadlineTimer {
    limit: Duration,
    margin: Duration,
    state: TimerState,
}

impl DeadlineTimer {
    pub fn new(limit: Duration, margin: Duration) -> Self {
        DeadlineTimer { limit, margin, state: TimerState::Idle }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// 剩余时间；未启动时返回 `None`
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Armed(start) => {
                Some(self.limit.saturating_sub(now.saturating_duration_since(start)))
            },
        }
    }

    /// 更新计时器
    ///
    /// 返回 true 表示本 tick 应该执行动作（已启动且剩余时间不足 margin）。
    /// 启动的那一 tick 不会触发。
    pub fn update(&mut self, reached: bool, now: Instant) -> bool {
        match (self.state, reached) {
            (TimerState::Idle, true) => {
                tracing::debug!("Deadline timer armed ({:?})", self.limit);
                self.state = TimerState::Armed(now);
                false
            },
            (TimerState::Armed(_), false) => {
                tracing::debug!("Deadline timer disarmed");
                self.state = TimerState::Idle;
                false
            },
            (TimerState::Idle, false) => false,
            (TimerState::Armed(_), true) => self.remaining(now).is_some_and(|r| r < self.margin),
        }
    }
}
