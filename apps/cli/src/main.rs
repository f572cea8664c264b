//! # XRC CLI
//!
//! 仿真器机器人自动化的命令行工具。
//!
//! ```bash
//! # 生成默认配置
//! xrc-cli config init
//!
//! # 读取一次状态文件，打印快照与本 tick 的控制输出
//! xrc-cli check --profile charged-up --state-dir ./sim
//!
//! # 运行自动化循环（Ctrl+C 停止）
//! xrc-cli run --profile rapid-react --alliance blue --csv ticks.csv
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{CheckCommand, ConfigCommand, RunCommand};

/// XRC CLI - 仿真器机器人自动化
#[derive(Parser, Debug)]
#[command(name = "xrc-cli")]
#[command(about = "Automation loop for xRC simulator robots", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件（默认为当前目录下的 xrc.toml，不存在时使用默认配置）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 运行自动化循环
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 读取一次快照并打印
    Check {
        #[command(flatten)]
        args: CheckCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xrc_cli=info".parse()?)
                .add_directive("xrc_control=info".parse()?)
                .add_directive("xrc_driver=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { args } => args.execute(config_path),
        Commands::Check { args } => args.execute(config_path),
        Commands::Config(cmd) => cmd.execute(config_path),
    }
}
