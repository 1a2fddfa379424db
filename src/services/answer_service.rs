//! 答案提交服务 - 业务能力层
//!
//! 答案始终提交到配置中的固定地址，与题目来源无关

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, TransportError};
use crate::infrastructure::{HttpClient, HttpMethod};
use crate::models::{AnswerRequest, AnswerResponse, AnswerResult};

/// 答案提交服务
pub struct AnswerService {
    http: Arc<dyn HttpClient>,
    endpoint: String,
}

impl AnswerService {
    pub fn new(http: Arc<dyn HttpClient>, config: &Config) -> Self {
        Self {
            http,
            endpoint: config.submission_endpoint.clone(),
        }
    }

    /// 提交选中的选项文本
    ///
    /// 请求体为 `{"answer": choice}`，网络错误或响应格式不符时返回错误
    pub async fn submit(&self, choice: &str) -> AppResult<AnswerResult> {
        let payload = serde_json::to_value(AnswerRequest::new(choice))
            .map_err(|e| AppError::submit_failed(&self.endpoint, TransportError::Body(e.to_string())))?;

        info!("📤 正在提交答案: {}", choice);
        debug!("提交 Payload: {}", payload);

        let value = self
            .http
            .request(HttpMethod::Post, &self.endpoint, Some(&payload))
            .await
            .map_err(|e| {
                warn!("提交答案失败: {}", e);
                AppError::submit_failed(&self.endpoint, e)
            })?;

        debug!("判题结果: {}", value);

        let response: AnswerResponse = serde_json::from_value(value).map_err(|e| {
            AppError::submit_failed(&self.endpoint, TransportError::Body(e.to_string()))
        })?;

        AnswerResult::from_response(response).map_err(|reason| AppError::MalformedResult {
            endpoint: self.endpoint.clone(),
            reason,
        })
    }
}
