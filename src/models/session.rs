//! 会话状态
//!
//! 整个程序只有一个会话状态对象，由 `ScreenController` 独占持有。
//! 这里的状态迁移都是同步的，只负责"当前状态下该输入是否合法"，
//! 网络请求由控制器在迁移之间完成。

use super::alert::Alert;
use super::question::Question;

/// 相机权限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPermission {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// 当前显示的界面
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// 启动后等待相机权限
    #[default]
    RequestingPermission,
    /// 权限被拒绝（终态）
    PermissionDenied,
    /// 相机取景中
    Scanning,
    /// 正在获取题目
    QuestionLoading { url: String },
    /// 显示题目和选项
    QuestionDisplayed { question: Question },
    /// 答对，等待用户确认后打开地图
    AnswerCorrect {
        question: Question,
        coordinates: String,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::RequestingPermission => "RequestingPermission",
            Screen::PermissionDenied => "PermissionDenied",
            Screen::Scanning => "Scanning",
            Screen::QuestionLoading { .. } => "QuestionLoading",
            Screen::QuestionDisplayed { .. } => "QuestionDisplayed",
            Screen::AnswerCorrect { .. } => "AnswerCorrect",
        }
    }
}

/// 会话统计，退出时写入日志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub scans_accepted: usize,
    pub scans_ignored: usize,
    pub questions_loaded: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub fetch_failures: usize,
    pub submit_failures: usize,
}

/// 会话状态
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    permission: CameraPermission,
    screen: Screen,
    pending_alert: Option<Alert>,
    pub stats: SessionStats,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(&self) -> CameraPermission {
        self.permission
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// 相机是否在取景
    pub fn is_scanning(&self) -> bool {
        matches!(self.screen, Screen::Scanning)
    }

    /// 上一次扫码结果是否已被占用（reset 前不会再接受扫码）
    pub fn last_scan_consumed(&self) -> bool {
        matches!(
            self.screen,
            Screen::QuestionLoading { .. }
                | Screen::QuestionDisplayed { .. }
                | Screen::AnswerCorrect { .. }
        )
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.screen {
            Screen::QuestionDisplayed { question } | Screen::AnswerCorrect { question, .. } => {
                Some(question)
            }
            _ => None,
        }
    }

    pub fn pending_alert(&self) -> Option<&Alert> {
        self.pending_alert.as_ref()
    }

    /// 是否可以接受扫码：取景中且没有待确认的提示框
    pub fn accepts_scan(&self) -> bool {
        self.is_scanning() && self.pending_alert.is_none()
    }

    /// 是否可以接受选项点击
    pub fn accepts_answer(&self) -> bool {
        matches!(self.screen, Screen::QuestionDisplayed { .. }) && self.pending_alert.is_none()
    }

    // ========== 状态迁移 ==========

    /// 记录权限结果，只在 `RequestingPermission` 下生效
    pub fn resolve_permission(&mut self, granted: bool) -> bool {
        if self.screen != Screen::RequestingPermission {
            return false;
        }
        if granted {
            self.permission = CameraPermission::Granted;
            self.screen = Screen::Scanning;
        } else {
            self.permission = CameraPermission::Denied;
            self.screen = Screen::PermissionDenied;
        }
        true
    }

    /// Scanning → QuestionLoading
    pub fn begin_loading(&mut self, url: impl Into<String>) -> bool {
        if !self.accepts_scan() {
            return false;
        }
        self.screen = Screen::QuestionLoading { url: url.into() };
        true
    }

    /// QuestionLoading → QuestionDisplayed
    pub fn question_loaded(&mut self, question: Question) -> bool {
        if !matches!(self.screen, Screen::QuestionLoading { .. }) {
            return false;
        }
        self.screen = Screen::QuestionDisplayed { question };
        true
    }

    /// QuestionLoading → Scanning，并弹出获取失败提示
    pub fn loading_failed(&mut self) -> bool {
        if !matches!(self.screen, Screen::QuestionLoading { .. }) {
            return false;
        }
        self.screen = Screen::Scanning;
        self.pending_alert = Some(Alert::FetchFailed);
        true
    }

    /// QuestionDisplayed → AnswerCorrect，并弹出答对提示
    pub fn answer_correct(&mut self, coordinates: impl Into<String>) -> bool {
        let question = match &self.screen {
            Screen::QuestionDisplayed { question } => question.clone(),
            _ => return false,
        };
        let coordinates = coordinates.into();
        self.pending_alert = Some(Alert::Correct {
            coordinates: coordinates.clone(),
        });
        self.screen = Screen::AnswerCorrect {
            question,
            coordinates,
        };
        true
    }

    /// 题目界面内的提示（答错、提交失败），状态不变
    pub fn notify(&mut self, alert: Alert) -> bool {
        if !matches!(self.screen, Screen::QuestionDisplayed { .. }) {
            return false;
        }
        self.pending_alert = Some(alert);
        true
    }

    /// 关闭当前提示框并返回它
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.pending_alert.take()
    }

    /// 清空题目回到 Scanning
    ///
    /// 只能从 Scanning、QuestionDisplayed 调用，且提示框必须已确认；
    /// AnswerCorrect 只能经由确认提示（打开地图）离开
    pub fn reset(&mut self) -> bool {
        if self.pending_alert.is_some() {
            return false;
        }
        match self.screen {
            Screen::Scanning | Screen::QuestionDisplayed { .. } => {
                self.screen = Screen::Scanning;
                true
            }
            _ => false,
        }
    }

    /// 答对的提示已确认、地图已打开，回到 Scanning
    pub(crate) fn map_opened(&mut self) -> bool {
        if self.pending_alert.is_some() || !matches!(self.screen, Screen::AnswerCorrect { .. }) {
            return false;
        }
        self.screen = Screen::Scanning;
        true
    }

    /// 地图打开失败时的提示，会话仍回到 Scanning
    pub(crate) fn launch_failed(&mut self) {
        self.screen = Screen::Scanning;
        self.pending_alert = Some(Alert::LaunchFailed);
    }
}
