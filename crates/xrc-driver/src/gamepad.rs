//! 手柄来源
//!
//! 仿真器本身不提供手柄状态。驾驶员手柄由外部桥接程序写入 `key=value` 文本，
//! 没有桥接时使用中立状态（所有按钮松开、摇杆回中）。

use crate::error::DriverError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use xrc_protocol::GamepadState;

/// 手柄状态来源
pub trait GamepadSource {
    /// 读取本 tick 的手柄状态
    fn read(&mut self) -> Result<GamepadState, DriverError>;
}

impl<G: GamepadSource + ?Sized> GamepadSource for Box<G> {
    fn read(&mut self) -> Result<GamepadState, DriverError> {
        (**self).read()
    }
}

/// 无手柄：始终返回中立状态
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGamepad;

impl GamepadSource for NullGamepad {
    fn read(&mut self) -> Result<GamepadState, DriverError> {
        Ok(GamepadState::default())
    }
}

/// 从桥接文件读取手柄状态
///
/// 文件不存在时视为手柄未连接（中立状态）；连接状态变化时记录一次日志。
#[derive(Debug, Clone)]
pub struct FileGamepad {
    path: PathBuf,
    connected: Option<bool>,
}

impl FileGamepad {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileGamepad { path: path.into(), connected: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn set_connected(&mut self, connected: bool) {
        if self.connected == Some(connected) {
            return;
        }
        if connected {
            tracing::info!("Gamepad bridge connected: {}", self.path.display());
        } else {
            tracing::warn!("No gamepad detected at {}, using neutral input", self.path.display());
        }
        self.connected = Some(connected);
    }
}

impl GamepadSource for FileGamepad {
    fn read(&mut self) -> Result<GamepadState, DriverError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                self.set_connected(true);
                Ok(GamepadState::parse_kv(&text)?)
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.set_connected(false);
                Ok(GamepadState::default())
            },
            Err(e) => Err(DriverError::io(&self.path, e)),
        }
    }
}
