//! 基于 reqwest 的网络能力

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::{HttpClient, HttpMethod};
use crate::config::Config;
use crate::error::{AppError, AppResult, TransportError};

/// reqwest 客户端
///
/// 未配置超时时使用 reqwest 的默认行为
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AppError::HttpClientInit)?;
        Ok(Self::from_client(client))
    }

    /// 使用外部构建好的 reqwest 客户端
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, TransportError> {
        debug!("{} {}", method, url);

        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            // json() 会同时设置 Content-Type: application/json
            request = request.json(body);
        }

        let response = request.send().await?.error_for_status()?;
        let status = response.status();
        let value: JsonValue = response.json().await?;

        debug!("{} {} -> {}: {}", method, url, status, value);
        Ok(value)
    }
}
