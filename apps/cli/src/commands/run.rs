//! run 命令
//!
//! 按配置运行自动化循环，直到 Ctrl+C 或达到最大 tick 数。

use super::Overrides;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use xrc_control::commands;
use xrc_driver::{FileControlSink, LoopConfig, run_automation};
use xrc_protocol::{ControlOutput, WorldSnapshot};
use xrc_tools::{AutomationConfig, TickLog, TickStatistics};

/// 运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    #[command(flatten)]
    pub overrides: Overrides,

    /// 控制输出文件
    #[arg(long)]
    pub controls: Option<PathBuf>,

    /// 循环频率（Hz）
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// 最大 tick 数
    #[arg(short = 'n', long)]
    pub max_iterations: Option<u64>,

    /// CSV tick 日志
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl RunCommand {
    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let mut config = self.overrides.resolve(config_path)?;
        self.apply(&mut config);
        config.validate().context("Invalid configuration")?;

        let stop = Arc::new(AtomicBool::new(false));
        let handler_stop = stop.clone();
        ctrlc::set_handler(move || {
            eprintln!("\nReceived interrupt signal. Stopping...");
            handler_stop.store(true, Ordering::Relaxed);
        })
        .context("Failed to set signal handler")?;

        let profile = config.robot.profile;
        let mut source = super::snapshot_source(&config);
        let mut automation = commands::pipeline_for(profile, &config.controller);
        let mut sink = FileControlSink::new(&config.io.controls_file);

        let mut tick_log = match config.log.csv_path {
            Some(ref path) => Some(
                TickLog::open(path)
                    .with_context(|| format!("Failed to open tick log: {}", path.display()))?,
            ),
            None => None,
        };

        println!("⏳ Running {} automation ({})", profile, config.robot.alliance);
        println!("   State directory: {}", config.io.state_dir.display());
        println!("   Controls file: {}", config.io.controls_file.display());
        if let Some(ref log) = tick_log {
            println!("   Tick log: {}", log.path().display());
        }

        let loop_config = LoopConfig {
            frequency_hz: config.run.frequency_hz,
            max_iterations: config.run.max_iterations,
        };
        let mut observer = |snapshot: &WorldSnapshot, output: &ControlOutput| {
            if let Some(log) = tick_log.as_mut()
                && let Err(e) = log.record(snapshot, output)
            {
                tracing::warn!("Tick log disabled after write failure: {}", e);
                tick_log = None;
            }
        };

        let started = Instant::now();
        let stats = run_automation(
            &mut source,
            automation.as_mut(),
            &mut sink,
            &mut observer,
            &loop_config,
            &stop,
        )?;
        let elapsed = started.elapsed();

        if let Some(mut log) = tick_log {
            log.flush().context("Failed to flush tick log")?;
            tracing::info!(rows = log.rows(), "Tick log written to {}", log.path().display());
        }

        let summary =
            TickStatistics::calculate(stats.completed, stats.discarded, stats.overruns, elapsed);
        println!("✅ Automation stopped");
        println!("{}", summary);
        println!("   Slowest tick: {:?}", stats.max_tick);
        Ok(())
    }

    /// run 专属的覆盖项
    fn apply(&self, config: &mut AutomationConfig) {
        if let Some(ref path) = self.controls {
            config.io.controls_file = path.clone();
        }
        if let Some(hz) = self.frequency {
            config.run.frequency_hz = hz;
        }
        if self.max_iterations.is_some() {
            config.run.max_iterations = self.max_iterations;
        }
        if let Some(ref path) = self.csv {
            config.log.csv_path = Some(path.clone());
        }
    }
}
