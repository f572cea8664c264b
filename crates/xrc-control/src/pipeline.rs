//! 命令管线
//!
//! 每个 tick：
//!
//! 1. 用快照构造 [`GeometryCache`]
//! 2. 由手柄状态生成控制布局（原样透传）
//! 3. 按注册顺序依次执行所有命令，每个命令只覆盖自己负责的字段
//! 4. 把控制布局映射为下游的 [`ControlOutput`]
//!
//! 命令在管线构造时创建一次，内部状态（模式、边沿标志、计时器）在整个进程生命周期内保留。

use crate::cache::GeometryCache;
use std::fmt::Debug;
use std::time::Instant;
use xrc_protocol::{ControlOutput, GamepadState, RobotProfile, WorldSnapshot};

/// 机器人专属的语义控制记录
///
/// 同一个手柄按键在不同机器人上含义不同（例如 `dpad_right`：
/// Rapid React 为"爬升臂伸出"，Charged Up 为"高位预设"）。
pub trait ControlLayout: Debug {
    /// 手柄状态原样透传
    fn from_gamepad(gamepad: &GamepadState) -> Self
    where
        Self: Sized;

    /// 映射为下游输出记录
    fn to_output(&self) -> ControlOutput;
}

/// 自动化命令
pub trait Command<L: ControlLayout> {
    /// 日志中使用的名称
    fn name(&self) -> &'static str;

    /// 执行一次
    ///
    /// 只修改自己负责的字段；其他字段保持前序命令写入的值。
    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut L);
}

/// 命令管线
pub struct CommandPipeline<L: ControlLayout> {
    profile: RobotProfile,
    commands: Vec<Box<dyn Command<L>>>,
    ticks: u64,
}

impl<L: ControlLayout> CommandPipeline<L> {
    pub fn new(profile: RobotProfile) -> Self {
        CommandPipeline { profile, commands: Vec::new(), ticks: 0 }
    }

    /// 追加命令（构造阶段使用）
    pub fn with_command(mut self, command: impl Command<L> + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    /// 命令名称（注册顺序）
    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 执行一个 tick，返回语义控制记录
    pub fn run_controls(&mut self, snapshot: &WorldSnapshot, now: Instant) -> L {
        self.ticks += 1;
        let _span = tracing::trace_span!("tick", n = self.ticks).entered();

        let cache = GeometryCache::at(snapshot, now);
        let mut controls = L::from_gamepad(snapshot.gamepad());
        for command in self.commands.iter_mut() {
            command.execute(&cache, &mut controls);
            tracing::trace!(command = command.name(), "executed");
        }
        controls
    }
}

impl<L: ControlLayout> Debug for CommandPipeline<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPipeline")
            .field("profile", &self.profile)
            .field("commands", &self.command_names())
            .field("ticks", &self.ticks)
            .finish()
    }
}

/// 与控制布局无关的管线接口（驱动层使用）
pub trait Automation {
    fn profile(&self) -> RobotProfile;

    /// 以给定时间戳执行一个 tick
    fn run_at(&mut self, snapshot: &WorldSnapshot, now: Instant) -> ControlOutput;

    /// 以当前时间执行一个 tick
    fn run(&mut self, snapshot: &WorldSnapshot) -> ControlOutput {
        self.run_at(snapshot, Instant::now())
    }
}

impl<L: ControlLayout> Automation for CommandPipeline<L> {
    fn profile(&self) -> RobotProfile {
        self.profile
    }

    fn run_at(&mut self, snapshot: &WorldSnapshot, now: Instant) -> ControlOutput {
        self.run_controls(snapshot, now).to_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::rapid_react_snapshot;

    #[derive(Debug, Default)]
    struct Layout {
        trace: Vec<&'static str>,
        a: bool,
    }

    impl ControlLayout for Layout {
        fn from_gamepad(gamepad: &GamepadState) -> Self {
            Layout { trace: Vec::new(), a: gamepad.a }
        }

        fn to_output(&self) -> ControlOutput {
            ControlOutput { a: self.a, ..Default::default() }
        }
    }

    struct Record {
        name: &'static str,
        calls: usize,
    }

    impl Command<Layout> for Record {
        fn name(&self) -> &'static str {
            self.name
        }

        fn execute(&mut self, _cache: &GeometryCache<'_>, controls: &mut Layout) {
            self.calls += 1;
            controls.trace.push(self.name);
        }
    }

    struct SetA;

    impl Command<Layout> for SetA {
        fn name(&self) -> &'static str {
            "set_a"
        }

        fn execute(&mut self, _cache: &GeometryCache<'_>, controls: &mut Layout) {
            controls.a = true;
        }
    }

    #[test]
    fn test_runs_in_registration_order() {
        let mut pipeline = CommandPipeline::<Layout>::new(RobotProfile::RapidReact)
            .with_command(Record { name: "first", calls: 0 })
            .with_command(Record { name: "second", calls: 0 })
            .with_command(Record { name: "third", calls: 0 });
        let snapshot = rapid_react_snapshot().build();

        let controls = pipeline.run_controls(&snapshot, Instant::now());
        assert_eq!(controls.trace, vec!["first", "second", "third"]);
        assert_eq!(pipeline.command_names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_untouched_fields_pass_through() {
        let snapshot = rapid_react_snapshot().build();

        let mut passthrough = CommandPipeline::<Layout>::new(RobotProfile::RapidReact);
        assert!(passthrough.is_empty());
        assert!(!passthrough.run(&snapshot).a);

        let mut overriding =
            CommandPipeline::<Layout>::new(RobotProfile::RapidReact).with_command(SetA);
        assert!(overriding.run(&snapshot).a);
        assert_eq!(overriding.profile(), RobotProfile::RapidReact);
    }
}
