//! 执行器辅助函数
//!
//! - 开关型执行器（伸出/收回两个按钮）：带死区的 bang-bang 控制
//! - 连续型执行器（正转/反转两个轴）：把有符号输出拆成两个非负通道
//! - 手动接管：任一手动轴 ≥ 0.5 时跳过该执行器的自动控制

/// 手动接管阈值
pub const MANUAL_OVERRIDE_THRESHOLD: f64 = 0.5;

/// 开关型执行器的动作方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Extend,
    Retract,
}

/// 带死区的 bang-bang 决策
///
/// 误差恰好等于死区边界时不动作。
pub fn drive_bang_bang(error: f64, deadband: f64) -> Option<Direction> {
    if error > deadband {
        Some(Direction::Extend)
    } else if error < -deadband {
        Some(Direction::Retract)
    } else {
        None
    }
}

/// 把 bang-bang 决策写入一对按钮
///
/// 死区外：置位一个、清除另一个；死区内：两个都保持原值。
pub fn apply_bang_bang(
    extend: &mut bool,
    retract: &mut bool,
    error: f64,
    deadband: f64,
) -> Option<Direction> {
    let direction = drive_bang_bang(error, deadband);
    match direction {
        Some(Direction::Extend) => {
            *extend = true;
            *retract = false;
        },
        Some(Direction::Retract) => {
            *extend = false;
            *retract = true;
        },
        None => {},
    }
    direction
}

/// 拆分有符号输出为 `(forward, reverse)`，两者不会同时非零
pub fn split_bidirectional(output: f64) -> (f64, f64) {
    if output > 0.0 {
        (output, 0.0)
    } else if output < 0.0 {
        (0.0, -output)
    } else {
        (0.0, 0.0)
    }
}

/// 把有符号输出写入一对轴；输出为 0 时两个轴都保持原值
pub fn apply_split(forward: &mut f64, reverse: &mut f64, output: f64) {
    if output == 0.0 || output.is_nan() {
        return;
    }
    (*forward, *reverse) = split_bidirectional(output);
}

/// 手动轴是否已经接管
pub fn manual_override(forward: f64, reverse: f64) -> bool {
    forward >= MANUAL_OVERRIDE_THRESHOLD || reverse >= MANUAL_OVERRIDE_THRESHOLD
}
