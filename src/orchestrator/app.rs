//! 应用主循环 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：装配终端、HTTP 客户端、地图启动器和控制器
//! 2. **事件循环**：渲染当前界面 → 等待输入（扫码或选项）→ 交给控制器
//! 3. **提示框**：每个事件之后逐个显示待确认的提示，确认后通知控制器
//! 4. **统计**：退出时输出会话统计
//!
//! 本层不做任何业务判断，状态是否合法全部由 `ScreenController` 决定。

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{
    CameraScanner, HttpClient, ReqwestHttpClient, SystemUrlLauncher, Terminal, UrlLauncher,
    UserAction, UserInterface,
};
use crate::models::{Screen, SessionStats};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{Outcome, ScreenController, UiEvent};

/// 应用主结构
pub struct App {
    config: Config,
    controller: ScreenController,
    scanner: Arc<dyn CameraScanner>,
    ui: Arc<dyn UserInterface>,
}

impl App {
    /// 用真实的平台能力初始化应用（终端 + reqwest + 系统浏览器）
    pub fn initialize(config: Config) -> AppResult<Self> {
        let terminal = Arc::new(Terminal::stdio(config.camera_permission));
        let http = Arc::new(ReqwestHttpClient::new(&config)?);
        let launcher = Arc::new(SystemUrlLauncher::new(config.launch_mode));

        Ok(Self::with_parts(config, terminal.clone(), http, launcher, terminal))
    }

    /// 用给定的能力实现装配应用
    pub fn with_parts(
        config: Config,
        scanner: Arc<dyn CameraScanner>,
        http: Arc<dyn HttpClient>,
        launcher: Arc<dyn UrlLauncher>,
        ui: Arc<dyn UserInterface>,
    ) -> Self {
        let controller = ScreenController::new(&config, scanner.clone(), http, launcher);
        Self {
            config,
            controller,
            scanner,
            ui,
        }
    }

    pub fn controller(&self) -> &ScreenController {
        &self.controller
    }

    /// 运行应用主循环
    ///
    /// 权限被拒绝、扫码输入关闭或用户退出时结束，返回会话统计
    pub async fn run(&mut self) -> AppResult<SessionStats> {
        log_startup(&self.config);

        self.ui.render(self.controller.screen());
        if self.controller.request_permission().await? == Outcome::PermissionDenied {
            self.ui.render(self.controller.screen());
            warn!("⚠️ {}，程序结束", AppError::PermissionDenied);
            return Ok(self.finish());
        }

        loop {
            self.drain_alerts().await?;

            let screen = self.controller.screen().clone();
            match &screen {
                Screen::Scanning => {
                    self.ui.render(&screen);
                    let Some(scan) = self.scanner.scan().await? else {
                        info!("扫码输入已关闭");
                        break;
                    };
                    if self.controller.session().accepts_scan() && scan.is_qr() {
                        self.ui.render(&Screen::QuestionLoading {
                            url: scan.data.clone(),
                        });
                    }
                    self.controller.handle(UiEvent::ScanDetected(scan)).await;
                }
                Screen::QuestionDisplayed { question } => {
                    self.ui.render(&screen);
                    let event = match self.ui.next_action(question).await? {
                        UserAction::Choose(index) => UiEvent::AnswerSelected(index),
                        UserAction::Rescan => UiEvent::ResetRequested,
                        UserAction::Quit => break,
                    };
                    self.controller.handle(event).await;
                }
                // AnswerCorrect 总带着答对提示，drain_alerts 确认后已离开该界面
                Screen::AnswerCorrect { .. }
                | Screen::RequestingPermission
                | Screen::PermissionDenied
                | Screen::QuestionLoading { .. } => break,
            }
        }

        Ok(self.finish())
    }

    /// 逐个显示并确认待处理的提示框
    async fn drain_alerts(&mut self) -> AppResult<()> {
        while let Some(alert) = self.controller.session().pending_alert().cloned() {
            self.ui.show_alert(&alert).await?;
            if let Outcome::MapOpened { url } =
                self.controller.handle(UiEvent::AlertAcknowledged).await
            {
                info!("✓ 已打开地图: {}", url);
            }
        }
        Ok(())
    }

    fn finish(&self) -> SessionStats {
        let stats = self.controller.session().stats;
        print_final_stats(&stats);
        stats
    }
}
