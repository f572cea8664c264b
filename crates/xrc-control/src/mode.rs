//! 边沿触发的模式状态机
//!
//! 模式只在按钮的**上升沿**（上一 tick 未按下 → 本 tick 按下）切换；
//! 一直按住只会切换一次。每个触发按钮有独立的边沿标志，互不影响。

use std::fmt::Debug;

/// 上升沿检测
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    last: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        EdgeTrigger::default()
    }

    /// 输入本 tick 的按钮电平，仅在 false → true 时返回 true
    pub fn rising(&mut self, level: bool) -> bool {
        let rising = level && !self.last;
        self.last = level;
        rising
    }
}

/// 可循环切换的模式
///
/// `ALL` 给出循环顺序，`next()` 在末尾回绕到开头。
pub trait CyclicMode: Copy + Eq + Debug + 'static {
    /// 全部取值（循环顺序）
    const ALL: &'static [Self];

    /// 日志中使用的名称
    fn name(self) -> &'static str;

    /// 循环中的下一个模式
    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// 单按钮循环切换
#[derive(Debug, Clone)]
pub struct ModeCycler<M: CyclicMode> {
    label: &'static str,
    mode: M,
    trigger: EdgeTrigger,
}

impl<M: CyclicMode> ModeCycler<M> {
    pub fn new(label: &'static str, initial: M) -> Self {
        ModeCycler { label, mode: initial, trigger: EdgeTrigger::new() }
    }

    pub fn mode(&self) -> M {
        self.mode
    }

    /// 输入本 tick 的按钮电平；上升沿时前进一步并返回新模式
    pub fn update(&mut self, button: bool) -> Option<M> {
        if !self.trigger.rising(button) {
            return None;
        }
        self.mode = self.mode.next();
        tracing::info!(mode = self.mode.name(), "Switching {}", self.label);
        Some(self.mode)
    }
}

/// 多按钮直接选择
///
/// 每个按钮绑定一个目标模式，各自独立检测上升沿。
/// 同一 tick 多个上升沿时，第一个绑定生效。
#[derive(Debug, Clone)]
pub struct ModeSelector<M: CyclicMode, const N: usize> {
    label: &'static str,
    mode: M,
    targets: [M; N],
    triggers: [EdgeTrigger; N],
}

impl<M: CyclicMode, const N: usize> ModeSelector<M, N> {
    pub fn new(label: &'static str, initial: M, targets: [M; N]) -> Self {
        ModeSelector { label, mode: initial, targets, triggers: [EdgeTrigger::new(); N] }
    }

    pub fn mode(&self) -> M {
        self.mode
    }

    /// 输入与 `targets` 一一对应的按钮电平；模式改变时返回新模式
    pub fn update(&mut self, buttons: [bool; N]) -> Option<M> {
        let mut selected = None;
        // 所有按钮都要更新边沿标志，不能短路
        for ((trigger, target), level) in self.triggers.iter_mut().zip(self.targets).zip(buttons) {
            if trigger.rising(level) && selected.is_none() {
                selected = Some(target);
            }
        }

        match selected {
            Some(target) if target != self.mode => {
                self.mode = target;
                tracing::info!(mode = target.name(), "Switching {}", self.label);
                Some(target)
            },
            _ => None,
        }
    }
}
