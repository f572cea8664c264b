//! # 自动化配置
//!
//! TOML 格式，所有字段都有默认值；缺失的表或键使用默认值。
//!
//! ```toml
//! [loop]
//! frequency_hz = 100.0
//!
//! [controller]
//! refresh_interval_ms = 187.5
//! nominal_dt_s = 1.0
//!
//! [robot]
//! profile = "charged-up"
//! alliance = "red"
//!
//! [io]
//! state_dir = "."
//! controls_file = "Controls.txt"
//! gamepad_file = "gamepad.txt"
//!
//! [log]
//! csv_path = "ticks.csv"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xrc_control::ControllerSettings;
use xrc_protocol::{Alliance, RobotProfile};

/// 循环频率下限（Hz）
pub const MIN_FREQUENCY_HZ: f64 = 1.0;

/// 循环频率上限（Hz）
pub const MAX_FREQUENCY_HZ: f64 = 10_000.0;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 自动化配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    #[serde(rename = "loop")]
    pub run: LoopSection,
    pub controller: ControllerSettings,
    pub robot: RobotSection,
    pub io: IoSection,
    pub log: LogSection,
}

/// 循环参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopSection {
    /// 执行频率（Hz）
    pub frequency_hz: f64,
    /// 最大 tick 数（不设置表示一直运行）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
}

impl Default for LoopSection {
    fn default() -> Self {
        LoopSection { frequency_hz: 100.0, max_iterations: None }
    }
}

/// 机器人参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSection {
    pub profile: RobotProfile,
    /// 机器人文件不带联盟信息时使用
    pub alliance: Alliance,
}

impl Default for RobotSection {
    fn default() -> Self {
        RobotSection { profile: RobotProfile::RapidReact, alliance: Alliance::Red }
    }
}

/// 文件路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoSection {
    /// 仿真器状态文件所在目录
    pub state_dir: PathBuf,
    /// 控制输出文件
    pub controls_file: PathBuf,
    /// 手柄桥接文件（不设置表示没有手柄）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamepad_file: Option<PathBuf>,
}

impl Default for IoSection {
    fn default() -> Self {
        IoSection {
            state_dir: PathBuf::from("."),
            controls_file: PathBuf::from("Controls.txt"),
            gamepad_file: None,
        }
    }
}

/// 日志
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// CSV tick 日志（不设置表示不记录）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
}

impl AutomationConfig {
    /// 从文件加载并校验
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AutomationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 保存到文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }

    /// 校验参数范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.run.frequency_hz) {
            return Err(ConfigError::Invalid(format!(
                "loop.frequency_hz must be in [{}, {}], got {}",
                MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ, self.run.frequency_hz
            )));
        }
        self.controller
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("controller: {}", e)))?;
        if self.io.controls_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("io.controls_file must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AutomationConfig::from_toml_str("").unwrap();
        assert_eq!(config, AutomationConfig::default());
        assert_eq!(config.run.frequency_hz, 100.0);
        assert_eq!(config.controller, ControllerSettings::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = AutomationConfig::from_toml_str(
            r#"
            [loop]
            frequency_hz = 50.0

            [robot]
            profile = "charged-up"
            alliance = "blue"

            [io]
            gamepad_file = "pad.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.run.frequency_hz, 50.0);
        assert_eq!(config.robot.profile, RobotProfile::ChargedUp);
        assert_eq!(config.robot.alliance, Alliance::Blue);
        assert_eq!(config.io.gamepad_file, Some(PathBuf::from("pad.txt")));
        assert_eq!(config.io.controls_file, PathBuf::from("Controls.txt"));
    }

    #[test]
    fn test_validation() {
        let err = AutomationConfig::from_toml_str("[loop]\nfrequency_hz = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        for hz in ["1e-300", "0.5", "1e9", "nan"] {
            let err = AutomationConfig::from_toml_str(&format!("[loop]\nfrequency_hz = {}\n", hz))
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{}", hz);
        }
        assert!(AutomationConfig::from_toml_str("[loop]\nfrequency_hz = 1.0\n").is_ok());

        let err =
            AutomationConfig::from_toml_str("[controller]\nnominal_dt_s = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("controller"));

        assert!(matches!(
            AutomationConfig::from_toml_str("[robot]\nprofile = \"fusion\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xrc.toml");

        let mut config = AutomationConfig::default();
        config.robot.profile = RobotProfile::ChargedUp;
        config.log.csv_path = Some(PathBuf::from("ticks.csv"));
        config.save(&path).unwrap();

        assert_eq!(AutomationConfig::load(&path).unwrap(), config);
        assert!(matches!(
            AutomationConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
