//! 基础设施层
//!
//! 持有平台资源（相机、网络、系统浏览器、终端），只暴露能力。
//! 控制器只依赖这里的 trait，测试时可以替换为假实现。

pub mod http;
pub mod launcher;
pub mod terminal;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::{AppResult, TransportError};
use crate::models::{Alert, Question, Screen};

pub use http::ReqwestHttpClient;
pub use launcher::SystemUrlLauncher;
pub use terminal::Terminal;

/// 条码类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeKind {
    Qr,
    Other(String),
}

/// 一次扫码结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub kind: BarcodeKind,
    /// 解码后的文本
    pub data: String,
}

impl ScanEvent {
    pub fn qr(data: impl Into<String>) -> Self {
        Self {
            kind: BarcodeKind::Qr,
            data: data.into(),
        }
    }

    pub fn is_qr(&self) -> bool {
        self.kind == BarcodeKind::Qr
    }
}

/// 相机能力
#[async_trait]
pub trait CameraScanner: Send + Sync {
    /// 请求相机权限，返回是否授予
    async fn request_permission(&self) -> AppResult<bool>;

    /// 等待下一次扫码，输入源关闭时返回 `None`
    async fn scan(&self) -> AppResult<Option<ScanEvent>>;
}

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// 网络能力
///
/// 带请求体时以 `application/json` 发送，响应体按 JSON 解析
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, TransportError>;
}

/// 打开链接的能力
#[async_trait]
pub trait UrlLauncher: Send + Sync {
    async fn launch(&self, url: &str) -> AppResult<()>;
}

/// 题目界面中的用户操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// 选择第 n 个选项（从 0 开始）
    Choose(usize),
    /// 放弃当前题目，重新扫码
    Rescan,
    /// 退出程序
    Quit,
}

/// 界面能力：渲染、提示框、读取用户操作
#[async_trait]
pub trait UserInterface: Send + Sync {
    fn render(&self, screen: &Screen);

    /// 显示提示框，用户确认后返回
    async fn show_alert(&self, alert: &Alert) -> AppResult<()>;

    /// 等待用户在题目界面中的下一步操作
    async fn next_action(&self, question: &Question) -> AppResult<UserAction>;
}
