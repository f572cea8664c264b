//! check 命令
//!
//! 读取一次状态文件，打印解析后的快照以及管线对这一帧的输出。
//! 不写控制输出文件。

use super::Overrides;
use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use xrc_control::{Automation, commands};
use xrc_driver::SnapshotSource;

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub overrides: Overrides,

    /// 同时打印本帧的控制输出
    #[arg(long)]
    pub output: bool,
}

impl CheckCommand {
    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let config = self.overrides.resolve(config_path)?;
        let mut source = super::snapshot_source(&config);

        let snapshot = source.acquire().with_context(|| {
            format!("Failed to read simulator state from {}", config.io.state_dir.display())
        })?;
        println!("✅ Snapshot parsed ({})", config.robot.profile);
        println!("{}", snapshot);

        if self.output {
            let mut automation = commands::pipeline_for(source.profile(), &config.controller);
            let output = automation.run(&snapshot);
            println!("Controls:");
            print!("{}", output.render());
        }
        Ok(())
    }
}
