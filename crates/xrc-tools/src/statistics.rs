//! # 循环统计
//!
//! 需要启用 `statistics` feature：
//! ```toml
//! xrc-tools = { workspace = true, features = ["statistics"] }
//! ```

use std::fmt;
use std::time::Duration;

/// 一次运行的统计摘要
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStatistics {
    /// 成功 tick 数
    pub completed: u64,

    /// 丢弃 tick 数
    pub discarded: u64,

    /// 超时 tick 数
    pub overruns: u64,

    /// 实际运行时间
    pub elapsed: Duration,

    /// 实际频率（tick/秒，含丢弃的 tick）
    pub effective_hz: f64,

    /// 丢弃率（%）
    pub discard_rate: f64,
}

impl TickStatistics {
    pub fn calculate(completed: u64, discarded: u64, overruns: u64, elapsed: Duration) -> Self {
        let total = completed + discarded;
        TickStatistics {
            completed,
            discarded,
            overruns,
            elapsed,
            effective_hz: Self::calculate_rate(total, elapsed),
            discard_rate: Self::calculate_discard_rate(total, discarded),
        }
    }

    /// 计算频率
    pub fn calculate_rate(ticks: u64, elapsed: Duration) -> f64 {
        if elapsed.is_zero() {
            return 0.0;
        }
        ticks as f64 / elapsed.as_secs_f64()
    }

    /// 计算丢弃率
    pub fn calculate_discard_rate(total: u64, discarded: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (discarded.min(total) as f64 / total as f64) * 100.0
    }
}

impl fmt::Display for TickStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks ({} discarded, {:.1}%), {} overruns, {:.1} Hz over {:.2?}",
            self.completed + self.discarded,
            self.discarded,
            self.discard_rate,
            self.overruns,
            self.effective_hz,
            self.elapsed
        )
    }
}
