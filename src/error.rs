use thiserror::Error;

use crate::models::Alert;

/// HTTP 能力层错误
///
/// 与具体的 HTTP 客户端实现无关，测试替身也可以构造
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// 连接失败或请求未能发出
    #[error("网络请求失败: {0}")]
    Connect(String),
    /// 请求超时
    #[error("请求超时")]
    Timeout,
    /// 服务端返回非 2xx 状态码
    #[error("服务端返回错误状态码: {0}")]
    Status(u16),
    /// 响应体不是合法的 JSON
    #[error("响应体解析失败: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else if err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Connect(err.to_string())
        }
    }
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 相机权限被拒绝
    #[error("相机权限被拒绝")]
    PermissionDenied,

    /// 获取题目失败（网络错误、非 2xx 或响应体格式错误）
    #[error("获取题目失败 ({url}): {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: TransportError,
    },

    /// 题目响应体缺少字段或选项为空
    #[error("题目格式无效 ({url}): {reason}")]
    MalformedQuestion { url: String, reason: String },

    /// 提交答案失败
    #[error("提交答案失败 ({endpoint}): {source}")]
    SubmitFailed {
        endpoint: String,
        #[source]
        source: TransportError,
    },

    /// 判题结果格式无效
    #[error("判题结果格式无效 ({endpoint}): {reason}")]
    MalformedResult { endpoint: String, reason: String },

    /// 打开地图失败
    #[error("无法打开链接 {url}: {reason}")]
    LaunchFailed { url: String, reason: String },

    /// 配置项取值错误
    #[error("配置项 {key} 解析失败: 值 '{value}' 不是合法的 {expected}")]
    InvalidConfig {
        key: String,
        value: String,
        expected: String,
    },

    /// 配置文件读取或解析失败
    #[error("配置文件 {path} 加载失败: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP 客户端构建失败
    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClientInit(#[from] reqwest::Error),

    /// TOML 解析失败
    #[error("TOML 解析失败: {0}")]
    Toml(#[from] toml::de::Error),

    /// 终端输入输出错误
    #[error("输入输出错误: {0}")]
    Io(#[from] std::io::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    pub fn fetch_failed(url: impl Into<String>, source: TransportError) -> Self {
        AppError::FetchFailed {
            url: url.into(),
            source,
        }
    }

    pub fn submit_failed(endpoint: impl Into<String>, source: TransportError) -> Self {
        AppError::SubmitFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn launch_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::LaunchFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        AppError::InvalidConfig {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn config_file(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::ConfigFile {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// 该错误对应的用户提示
    ///
    /// 权限、配置等错误不以提示框的形式出现
    pub fn alert(&self) -> Option<Alert> {
        if self.is_fetch_error() {
            Some(Alert::FetchFailed)
        } else if self.is_submit_error() {
            Some(Alert::SubmitFailed)
        } else if matches!(self, AppError::LaunchFailed { .. }) {
            Some(Alert::LaunchFailed)
        } else {
            None
        }
    }

    /// 是否属于"获取题目"阶段的错误
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AppError::FetchFailed { .. } | AppError::MalformedQuestion { .. }
        )
    }

    /// 是否属于"提交答案"阶段的错误
    pub fn is_submit_error(&self) -> bool {
        matches!(
            self,
            AppError::SubmitFailed { .. } | AppError::MalformedResult { .. }
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_and_submit_errors_are_classified() {
        let fetch = AppError::fetch_failed("https://x/q", TransportError::Timeout);
        let malformed = AppError::MalformedQuestion {
            url: "https://x/q".into(),
            reason: "choices 为空".into(),
        };
        let submit = AppError::submit_failed("https://x/question", TransportError::Status(500));

        assert!(fetch.is_fetch_error());
        assert!(malformed.is_fetch_error());
        assert!(!submit.is_fetch_error());
        assert!(submit.is_submit_error());

        assert_eq!(fetch.alert(), Some(Alert::FetchFailed));
        assert_eq!(malformed.alert(), Some(Alert::FetchFailed));
        assert_eq!(submit.alert(), Some(Alert::SubmitFailed));
        assert_eq!(AppError::PermissionDenied.alert(), None);
    }

    #[test]
    fn source_chain_is_preserved() {
        use std::error::Error as _;

        let err = AppError::fetch_failed("https://x/q", TransportError::Status(404));
        let source = err.source().expect("missing source");
        assert_eq!(source.to_string(), "服务端返回错误状态码: 404");
        assert!(err.to_string().contains("https://x/q"));
    }
}
