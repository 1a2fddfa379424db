//! 题目获取服务 - 业务能力层
//!
//! 只负责"根据扫码得到的地址取回一道题"，不关心界面状态

use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, TransportError};
use crate::infrastructure::{HttpClient, HttpMethod};
use crate::models::{Question, QuestionBody};

/// 题目获取服务
pub struct QuestionService {
    http: Arc<dyn HttpClient>,
}

impl QuestionService {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// 获取题目
    ///
    /// # 参数
    /// - `url`: 二维码内容，按绝对地址处理
    ///
    /// # 返回
    /// 网络错误、非 2xx、JSON 格式不符或选项为空时返回错误，不做重试
    pub async fn fetch(&self, url: &str) -> AppResult<Question> {
        let url = Self::validate_url(url)?;

        info!("🔍 正在获取题目: {}", url);
        let value = self
            .http
            .request(HttpMethod::Get, &url, None)
            .await
            .map_err(|e| {
                warn!("获取题目失败: {}", e);
                AppError::fetch_failed(url.as_str(), e)
            })?;

        debug!("题目响应: {}", value);

        let body: QuestionBody = serde_json::from_value(value).map_err(|e| {
            AppError::fetch_failed(url.as_str(), TransportError::Body(e.to_string()))
        })?;

        let question = Question::from_body(body).map_err(|reason| {
            warn!("题目格式无效: {}", reason);
            AppError::MalformedQuestion {
                url: url.clone(),
                reason,
            }
        })?;

        info!("✓ 获取题目成功: {}", question);
        Ok(question)
    }

    /// 二维码内容必须是 http(s) 绝对地址
    fn validate_url(raw: &str) -> AppResult<String> {
        let trimmed = raw.trim();
        let parsed = Url::parse(trimmed).map_err(|e| {
            AppError::fetch_failed(trimmed, TransportError::Connect(format!("无效的地址: {}", e)))
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(trimmed.to_string()),
            scheme => Err(AppError::fetch_failed(
                trimmed,
                TransportError::Connect(format!("不支持的协议: {}", scheme)),
            )),
        }
    }
}
