//! 界面状态控制器 - 流程层
//!
//! 核心职责：根据当前界面决定每个输入是否合法，并驱动
//! 扫码 → 获取题目 → 作答 → 判题 → 打开地图 → 重置 这条线性流程。
//!
//! 状态迁移：
//! ```text
//! RequestingPermission → PermissionDenied（终态）
//!                      → Scanning → QuestionLoading → QuestionDisplayed
//!                                       ↑ 获取失败 ↙        │ 答错 / 提交失败：停留
//!                        Scanning ←── 确认后打开地图 ←── AnswerCorrect
//! ```
//!
//! 所有失败都只弹出一次提示，不自动重试。

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CameraScanner, HttpClient, ScanEvent, UrlLauncher};
use crate::models::{Alert, AnswerResult, Screen, SessionState};
use crate::services::{AnswerService, MapService, QuestionService};
use crate::utils::logging::truncate_text;

/// 界面事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ScanDetected(ScanEvent),
    /// 点击第 n 个选项（从 0 开始）
    AnswerSelected(usize),
    AlertAcknowledged,
    ResetRequested,
}

/// 事件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 当前状态不接受该输入，无副作用
    Ignored,
    PermissionGranted,
    PermissionDenied,
    QuestionLoaded,
    FetchFailed,
    Correct,
    Incorrect,
    SubmitFailed,
    AlertDismissed,
    MapOpened { url: String },
    MapLaunchFailed,
    Reset,
}

/// 界面状态控制器
///
/// 独占持有会话状态；每个事件都以 `&mut self` 处理，
/// 因此同一时刻最多只有一个事件在进行
pub struct ScreenController {
    session: SessionState,
    scanner: Arc<dyn CameraScanner>,
    questions: QuestionService,
    answers: AnswerService,
    maps: MapService,
}

impl ScreenController {
    pub fn new(
        config: &Config,
        scanner: Arc<dyn CameraScanner>,
        http: Arc<dyn HttpClient>,
        launcher: Arc<dyn UrlLauncher>,
    ) -> Self {
        Self {
            session: SessionState::new(),
            scanner,
            questions: QuestionService::new(http.clone()),
            answers: AnswerService::new(http, config),
            maps: MapService::new(launcher, config),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        self.session.screen()
    }

    /// 分发界面事件
    pub async fn handle(&mut self, event: UiEvent) -> Outcome {
        match event {
            UiEvent::ScanDetected(scan) => self.on_scan_detected(scan).await,
            UiEvent::AnswerSelected(index) => self.select_choice(index).await,
            UiEvent::AlertAcknowledged => self.acknowledge_alert().await,
            UiEvent::ResetRequested => self.reset(),
        }
    }

    /// 请求相机权限
    ///
    /// 只在启动后的 `RequestingPermission` 状态下有效，拒绝后不再重试
    pub async fn request_permission(&mut self) -> AppResult<Outcome> {
        if self.session.screen() != &Screen::RequestingPermission {
            debug!("忽略重复的权限请求");
            return Ok(Outcome::Ignored);
        }

        info!("📷 正在请求相机权限...");
        let granted = self.scanner.request_permission().await?;
        self.session.resolve_permission(granted);

        if granted {
            info!("✓ 相机权限已授予");
            Ok(Outcome::PermissionGranted)
        } else {
            warn!("⚠️ 相机权限被拒绝");
            Ok(Outcome::PermissionDenied)
        }
    }

    /// 处理一次扫码
    ///
    /// 只在 `Scanning` 下接受二维码；获取失败时弹出提示并回到 `Scanning`
    pub async fn on_scan_detected(&mut self, scan: ScanEvent) -> Outcome {
        if !self.session.accepts_scan() {
            self.session.stats.scans_ignored += 1;
            debug!(
                "忽略扫码（当前界面: {}）: {}",
                self.session.screen().name(),
                truncate_text(&scan.data, 80)
            );
            return Outcome::Ignored;
        }
        if !scan.is_qr() {
            self.session.stats.scans_ignored += 1;
            debug!("忽略非二维码: {:?}", scan.kind);
            return Outcome::Ignored;
        }

        self.session.stats.scans_accepted += 1;
        self.session.begin_loading(scan.data.as_str());
        self.log_transition("Scanning");

        match self.questions.fetch(&scan.data).await {
            Ok(question) => {
                self.session.stats.questions_loaded += 1;
                self.session.question_loaded(question);
                self.log_transition("QuestionLoading");
                Outcome::QuestionLoaded
            }
            Err(e) => {
                self.session.stats.fetch_failures += 1;
                error!("❌ {}", e);
                self.session.loading_failed();
                self.log_transition("QuestionLoading");
                Outcome::FetchFailed
            }
        }
    }

    /// 按下标选择选项
    pub async fn select_choice(&mut self, index: usize) -> Outcome {
        let choice = match self
            .session
            .current_question()
            .and_then(|q| q.choice(index))
        {
            Some(choice) => choice.to_string(),
            None => {
                debug!("忽略无效的选项下标: {}", index);
                return Outcome::Ignored;
            }
        };
        self.on_answer_selected(&choice).await
    }

    /// 提交选项文本
    ///
    /// 只在 `QuestionDisplayed` 下有效，且必须是当前题目的选项之一
    pub async fn on_answer_selected(&mut self, choice: &str) -> Outcome {
        if !self.session.accepts_answer() {
            debug!(
                "忽略作答（当前界面: {}）",
                self.session.screen().name()
            );
            return Outcome::Ignored;
        }
        let known = self
            .session
            .current_question()
            .is_some_and(|q| q.choices().iter().any(|c| c == choice));
        if !known {
            debug!("忽略不属于当前题目的选项: {}", choice);
            return Outcome::Ignored;
        }

        match self.answers.submit(choice).await {
            Ok(AnswerResult::Correct { coordinates }) => {
                self.session.stats.correct += 1;
                info!("✅ 回答正确，坐标: {}", coordinates);
                self.session.answer_correct(coordinates);
                self.log_transition("QuestionDisplayed");
                Outcome::Correct
            }
            Ok(AnswerResult::Incorrect) => {
                self.session.stats.incorrect += 1;
                info!("❎ 回答错误: {}", choice);
                self.session.notify(Alert::Incorrect);
                Outcome::Incorrect
            }
            Err(e) => {
                self.session.stats.submit_failures += 1;
                error!("❌ {}", e);
                self.session
                    .notify(e.alert().unwrap_or(Alert::SubmitFailed));
                Outcome::SubmitFailed
            }
        }
    }

    /// 确认当前提示框
    ///
    /// 答对的提示确认后打开地图并回到 `Scanning`
    pub async fn acknowledge_alert(&mut self) -> Outcome {
        let Some(alert) = self.session.take_alert() else {
            return Outcome::Ignored;
        };

        let Some(coordinates) = alert.map_handoff() else {
            debug!("提示已确认: {}", alert);
            return Outcome::AlertDismissed;
        };

        match self.maps.open(coordinates).await {
            Ok(url) => {
                self.session.map_opened();
                self.log_transition("AnswerCorrect");
                Outcome::MapOpened { url }
            }
            Err(e) => {
                error!("❌ {}", e);
                self.session.launch_failed();
                self.log_transition("AnswerCorrect");
                Outcome::MapLaunchFailed
            }
        }
    }

    /// 清空题目并回到 `Scanning`
    pub fn reset(&mut self) -> Outcome {
        let from = self.session.screen().name();
        if self.session.reset() {
            self.log_transition(from);
            Outcome::Reset
        } else {
            debug!("忽略重置（当前界面: {}）", from);
            Outcome::Ignored
        }
    }

    fn log_transition(&self, from: &str) {
        info!("界面: {} → {}", from, self.session.screen().name());
    }
}
