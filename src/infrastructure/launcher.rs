//! 系统链接打开能力

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use super::UrlLauncher;
use crate::config::LaunchMode;
use crate::error::{AppError, AppResult};

/// 通过系统默认程序打开链接，或仅打印链接
pub struct SystemUrlLauncher {
    mode: LaunchMode,
}

impl SystemUrlLauncher {
    pub fn new(mode: LaunchMode) -> Self {
        Self { mode }
    }

    fn command(url: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

#[async_trait]
impl UrlLauncher for SystemUrlLauncher {
    async fn launch(&self, url: &str) -> AppResult<()> {
        match self.mode {
            LaunchMode::Print => {
                println!("Open in maps: {}", url);
                info!("🗺️ 地图链接: {}", url);
                Ok(())
            }
            LaunchMode::System => {
                info!("🗺️ 正在打开地图: {}", url);
                let status = Self::command(url)
                    .status()
                    .await
                    .map_err(|e| AppError::launch_failed(url, e.to_string()))?;
                if status.success() {
                    Ok(())
                } else {
                    warn!("打开地图的命令退出码异常: {}", status);
                    Err(AppError::launch_failed(url, format!("退出状态 {}", status)))
                }
            }
        }
    }
}
