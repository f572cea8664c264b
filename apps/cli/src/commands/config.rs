//! config 命令

use super::DEFAULT_CONFIG_FILE;
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use xrc_tools::AutomationConfig;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 写出默认配置
    Init {
        /// 目标文件（默认为 --config 或 xrc.toml）
        path: Option<PathBuf>,

        /// 覆盖已有文件
        #[arg(short, long)]
        force: bool,
    },

    /// 打印当前生效的配置
    Show,
}

impl ConfigCommand {
    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        match self {
            ConfigCommand::Init { path, force } => {
                let target = path
                    .as_deref()
                    .or(config_path)
                    .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
                init(target, *force)
            },
            ConfigCommand::Show => {
                let config = super::load_config(config_path)?;
                print!("{}", config.to_toml_string()?);
                Ok(())
            },
        }
    }
}

fn init(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }
    AutomationConfig::default()
        .save(target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!("✅ Default configuration written to {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("xrc.toml");

        init(&target, false).unwrap();
        assert_eq!(AutomationConfig::load(&target).unwrap(), AutomationConfig::default());

        assert!(init(&target, false).is_err());
        init(&target, true).unwrap();
    }
}
