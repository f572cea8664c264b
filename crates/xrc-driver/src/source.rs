//! 快照来源
//!
//! 仿真器每帧改写状态目录下的三个文件。读取时任意一个文件缺失、被截断或
//! 格式错误，整个快照作废，由循环丢弃这一 tick 后重试。

use crate::error::DriverError;
use crate::gamepad::GamepadSource;
use std::fs;
use std::path::{Path, PathBuf};
use xrc_protocol::{Alliance, RobotProfile, SnapshotTexts, WorldSnapshot};

/// 比赛状态文件名
pub const GAME_STATE_FILE: &str = "GAME_STATE.txt";

/// 场地元素文件名
pub const ELEMENTS_FILE: &str = "GameElements.txt";

/// 机器人状态文件名
pub const ROBOT_FILE: &str = "myRobot.txt";

/// 快照来源
pub trait SnapshotSource {
    fn profile(&self) -> RobotProfile;

    /// 获取一个完整快照
    fn acquire(&mut self) -> Result<WorldSnapshot, DriverError>;
}

/// 从状态目录读取快照
#[derive(Debug)]
pub struct FileSnapshotSource<G = Box<dyn GamepadSource>> {
    state_dir: PathBuf,
    profile: RobotProfile,
    alliance: Alliance,
    gamepad: G,
}

impl<G: GamepadSource> FileSnapshotSource<G> {
    /// 创建快照来源
    ///
    /// 机器人文件不带联盟信息时（Rapid React）使用 `alliance`。
    pub fn new(
        state_dir: impl Into<PathBuf>,
        profile: RobotProfile,
        alliance: Alliance,
        gamepad: G,
    ) -> Self {
        FileSnapshotSource { state_dir: state_dir.into(), profile, alliance, gamepad }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn read(&self, name: &str) -> Result<String, DriverError> {
        let path = self.state_dir.join(name);
        fs::read_to_string(&path).map_err(|e| DriverError::io(path, e))
    }
}

impl<G: GamepadSource> SnapshotSource for FileSnapshotSource<G> {
    fn profile(&self) -> RobotProfile {
        self.profile
    }

    fn acquire(&mut self) -> Result<WorldSnapshot, DriverError> {
        let game = self.read(GAME_STATE_FILE)?;
        let elements = self.read(ELEMENTS_FILE)?;
        let robot = self.read(ROBOT_FILE)?;
        let gamepad = self.gamepad.read()?;

        let texts = SnapshotTexts { game: &game, elements: &elements, robot: &robot };
        Ok(WorldSnapshot::parse(self.profile, texts, gamepad, self.alliance)?)
    }
}
