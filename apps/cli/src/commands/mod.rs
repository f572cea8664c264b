//! 子命令实现

pub mod check;
pub mod config;
pub mod run;

pub use check::CheckCommand;
pub use config::ConfigCommand;
pub use run::RunCommand;

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use xrc_driver::{FileGamepad, FileSnapshotSource, GamepadSource, NullGamepad};
use xrc_protocol::{Alliance, RobotProfile};
use xrc_tools::AutomationConfig;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "xrc.toml";

/// 加载配置
///
/// 显式指定的文件必须存在；默认文件不存在时使用默认配置。
pub fn load_config(path: Option<&Path>) -> Result<AutomationConfig> {
    match path {
        Some(path) => AutomationConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            AutomationConfig::load(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load config: {}", DEFAULT_CONFIG_FILE))
        },
        None => Ok(AutomationConfig::default()),
    }
}

/// 覆盖配置文件的命令行参数（`run` 与 `check` 共用）
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// 机器人配置（rapid-react / charged-up）
    #[arg(short, long)]
    pub profile: Option<RobotProfile>,

    /// 联盟（机器人文件不带联盟信息时使用）
    #[arg(short, long)]
    pub alliance: Option<Alliance>,

    /// 仿真器状态文件所在目录
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// 手柄桥接文件
    #[arg(long)]
    pub gamepad: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, config: &mut AutomationConfig) {
        if let Some(profile) = self.profile {
            config.robot.profile = profile;
        }
        if let Some(alliance) = self.alliance {
            config.robot.alliance = alliance;
        }
        if let Some(ref dir) = self.state_dir {
            config.io.state_dir = dir.clone();
        }
        if let Some(ref file) = self.gamepad {
            config.io.gamepad_file = Some(file.clone());
        }
    }

    /// 加载配置并应用覆盖，结果经过校验
    pub fn resolve(&self, config_path: Option<&Path>) -> Result<AutomationConfig> {
        let mut config = load_config(config_path)?;
        self.apply(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// 按配置创建快照来源
pub fn snapshot_source(config: &AutomationConfig) -> FileSnapshotSource {
    let gamepad: Box<dyn GamepadSource> = match config.io.gamepad_file {
        Some(ref path) => Box::new(FileGamepad::new(path)),
        None => Box::new(NullGamepad),
    };
    FileSnapshotSource::new(
        &config.io.state_dir,
        config.robot.profile,
        config.robot.alliance,
        gamepad,
    )
}
