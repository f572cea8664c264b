//! 控制输出目标

use crate::error::DriverError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use xrc_protocol::ControlOutput;

/// 控制输出文件名
pub const CONTROLS_FILE: &str = "Controls.txt";

/// 控制输出目标
pub trait ControlSink {
    /// 发布一个 tick 的控制输出
    fn publish(&mut self, output: &ControlOutput) -> Result<(), DriverError>;
}

/// 内存目标（按顺序保存所有输出）
impl ControlSink for Vec<ControlOutput> {
    fn publish(&mut self, output: &ControlOutput) -> Result<(), DriverError> {
        self.push(*output);
        Ok(())
    }
}

/// 写入 `Controls.txt`
///
/// 先写入同目录下的临时文件，再 rename 覆盖目标文件，
/// 仿真器读到的永远是完整的一条记录。
#[derive(Debug, Clone)]
pub struct FileControlSink {
    path: PathBuf,
    temp_path: PathBuf,
}

impl FileControlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);
        FileControlSink { path, temp_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ControlSink for FileControlSink {
    fn publish(&mut self, output: &ControlOutput) -> Result<(), DriverError> {
        let file = File::create(&self.temp_path).map_err(|e| DriverError::io(&self.temp_path, e))?;
        let mut writer = BufWriter::new(file);
        output
            .write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| DriverError::io(&self.temp_path, e))?;
        drop(writer);

        fs::rename(&self.temp_path, &self.path).map_err(|e| DriverError::io(&self.path, e))
    }
}
