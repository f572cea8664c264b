//! 下游控制输出记录
//!
//! 仿真器读取的 `Controls.txt` 是一个"虚拟手柄"：每个字段对应一个手柄按键/轴，
//! 具体含义由机器人的按键映射决定（见 `xrc-control` 中各机器人的控制布局）。

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// 默认精细控制量
pub const DEFAULT_PRECISION: f64 = 0.3;

/// 控制输出记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlOutput {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub dpad_down: bool,
    pub dpad_up: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub bumper_l: bool,
    pub bumper_r: bool,
    pub stop: bool,
    pub restart: bool,
    pub right_y: f64,
    pub right_x: f64,
    pub left_y: f64,
    pub left_x: f64,
    pub trigger_l: f64,
    pub trigger_r: f64,
    pub precision: f64,
}

impl Default for ControlOutput {
    fn default() -> Self {
        ControlOutput {
            a: false,
            b: false,
            x: false,
            y: false,
            dpad_down: false,
            dpad_up: false,
            dpad_left: false,
            dpad_right: false,
            bumper_l: false,
            bumper_r: false,
            stop: false,
            restart: false,
            right_y: 0.0,
            right_x: 0.0,
            left_y: 0.0,
            left_x: 0.0,
            trigger_l: 0.0,
            trigger_r: 0.0,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ControlOutput {
    /// 按固定顺序写出 `Controls.txt` 格式
    ///
    /// ```text
    /// a=0
    /// ...
    /// precision=0.3
    /// ```
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        let flag = |v: bool| if v { 1 } else { 0 };

        writeln!(w, "a={}", flag(self.a))?;
        writeln!(w, "b={}", flag(self.b))?;
        writeln!(w, "x={}", flag(self.x))?;
        writeln!(w, "y={}", flag(self.y))?;
        writeln!(w, "dpad_down={}", flag(self.dpad_down))?;
        writeln!(w, "dpad_up={}", flag(self.dpad_up))?;
        writeln!(w, "dpad_left={}", flag(self.dpad_left))?;
        writeln!(w, "dpad_right={}", flag(self.dpad_right))?;
        writeln!(w, "bumper_l={}", flag(self.bumper_l))?;
        writeln!(w, "bumper_r={}", flag(self.bumper_r))?;
        writeln!(w, "stop={}", flag(self.stop))?;
        writeln!(w, "restart={}", flag(self.restart))?;
        writeln!(w, "right_y={}", self.right_y)?;
        writeln!(w, "right_x={}", self.right_x)?;
        writeln!(w, "left_y={}", self.left_y)?;
        writeln!(w, "left_x={}", self.left_x)?;
        writeln!(w, "trigger_l={}", self.trigger_l)?;
        writeln!(w, "trigger_r={}", self.trigger_r)?;
        writeln!(w, "precision={}", self.precision)?;
        Ok(())
    }

    /// 渲染为字符串（调试与 `check` 子命令使用）
    pub fn render(&self) -> String {
        let mut buf = Vec::with_capacity(256);
        // 写入 Vec 不会失败
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_precision() {
        assert_eq!(ControlOutput::default().precision, DEFAULT_PRECISION);
    }

    #[test]
    fn test_write_format() {
        let output = ControlOutput {
            a: true,
            dpad_right: true,
            right_x: -0.25,
            trigger_r: 1.0,
            ..Default::default()
        };
        let text = output.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 19);
        assert_eq!(lines[0], "a=1");
        assert_eq!(lines[1], "b=0");
        assert_eq!(lines[7], "dpad_right=1");
        assert_eq!(lines[13], "right_x=-0.25");
        assert_eq!(lines[17], "trigger_r=1");
        assert_eq!(lines[18], "precision=0.3");
    }
}
