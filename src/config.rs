//! 程序配置
//!
//! 优先级：默认值 < TOML 配置文件 < 环境变量

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// 默认的答案提交地址
pub const DEFAULT_SUBMISSION_ENDPOINT: &str =
    "https://f769c051-c74b-429b-86b7-9624edfecb75.mock.pstmn.io/question";

/// 地图搜索地址前缀，坐标直接拼接在后面
pub const DEFAULT_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "qr_quest.toml";

/// 相机权限的获取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    /// 启动时询问用户
    Ask,
    /// 直接授予
    Granted,
    /// 直接拒绝
    Denied,
}

impl FromStr for PermissionMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            other => Err(AppError::invalid_config("CAMERA_PERMISSION", other, "ask|granted|denied")),
        }
    }
}

/// 地图链接的打开方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// 交给系统默认程序打开
    System,
    /// 只打印链接
    Print,
}

impl FromStr for LaunchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "print" => Ok(Self::Print),
            other => Err(AppError::invalid_config("LAUNCH_MODE", other, "system|print")),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 答案提交地址（与扫描到的题目地址无关）
    pub submission_endpoint: String,
    /// 地图搜索地址前缀
    pub maps_search_url: String,
    /// 请求超时，未设置时使用 HTTP 客户端的默认行为
    pub request_timeout_secs: Option<u64>,
    pub camera_permission: PermissionMode,
    pub launch_mode: LaunchMode,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submission_endpoint: DEFAULT_SUBMISSION_ENDPOINT.to_string(),
            maps_search_url: DEFAULT_MAPS_SEARCH_URL.to_string(),
            request_timeout_secs: None,
            camera_permission: PermissionMode::Ask,
            launch_mode: LaunchMode::System,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件中的可选字段
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    submission_endpoint: Option<String>,
    maps_search_url: Option<String>,
    request_timeout_secs: Option<u64>,
    camera_permission: Option<PermissionMode>,
    launch_mode: Option<LaunchMode>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载完整配置：默认值 → 配置文件（存在时）→ 环境变量
    ///
    /// 配置文件路径取 `QR_QUEST_CONFIG`，否则为当前目录下的 `qr_quest.toml`
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("QR_QUEST_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };

        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config_file(path.display().to_string(), e))?;
        let file: FileConfig = toml::from_str(&content)
            .map_err(|e| AppError::config_file(path.display().to_string(), e))?;
        Self::from_file_config(file)
    }

    /// 解析 TOML 文本，未出现的字段保留默认值
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let file: FileConfig = toml::from_str(content)?;
        Self::from_file_config(file)
    }

    fn from_file_config(file: FileConfig) -> AppResult<Self> {
        let default = Self::default();
        if let Some(secs) = file.request_timeout_secs {
            check_timeout(secs, "request_timeout_secs")?;
        }

        Ok(Self {
            submission_endpoint: file.submission_endpoint.unwrap_or(default.submission_endpoint),
            maps_search_url: file.maps_search_url.unwrap_or(default.maps_search_url),
            request_timeout_secs: file.request_timeout_secs.or(default.request_timeout_secs),
            camera_permission: file.camera_permission.unwrap_or(default.camera_permission),
            launch_mode: file.launch_mode.unwrap_or(default.launch_mode),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    /// 用环境变量覆盖当前配置
    ///
    /// `lookup` 抽象了环境变量的读取，便于测试
    pub fn with_env_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SUBMISSION_ENDPOINT") {
            self.submission_endpoint = v;
        }
        if let Some(v) = lookup("MAPS_SEARCH_URL") {
            self.maps_search_url = v;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse()
                .map_err(|_| AppError::invalid_config("REQUEST_TIMEOUT_SECS", &v, "u64"))?;
            self.request_timeout_secs = Some(check_timeout(secs, "REQUEST_TIMEOUT_SECS")?);
        }
        if let Some(v) = lookup("CAMERA_PERMISSION") {
            self.camera_permission = v.parse()?;
        }
        if let Some(v) = lookup("LAUNCH_MODE") {
            self.launch_mode = v.parse()?;
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = v
                .trim()
                .parse()
                .map_err(|_| AppError::invalid_config("VERBOSE_LOGGING", &v, "bool"))?;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 0 秒超时会让每个请求立即失败
fn check_timeout(secs: u64, key: &str) -> AppResult<u64> {
    if secs == 0 {
        return Err(AppError::invalid_config(key, "0", "positive u64"));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_uses_fixed_submission_endpoint() {
        let config = Config::default();
        assert_eq!(config.submission_endpoint, DEFAULT_SUBMISSION_ENDPOINT);
        assert_eq!(config.maps_search_url, DEFAULT_MAPS_SEARCH_URL);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let config = Config::from_toml_str(
            r#"
            submission_endpoint = "http://localhost:9000/question"
            camera_permission = "granted"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.submission_endpoint, "http://localhost:9000/question");
        assert_eq!(config.camera_permission, PermissionMode::Granted);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.launch_mode, LaunchMode::System);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(Config::from_toml_str("submit_url = \"x\"").is_err());
    }

    #[test]
    fn env_overrides_win_over_file() {
        let env: HashMap<&str, &str> = [
            ("LAUNCH_MODE", "print"),
            ("VERBOSE_LOGGING", "true"),
            ("CAMERA_PERMISSION", "Denied"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_toml_str("launch_mode = \"system\"")
            .unwrap()
            .with_env_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.launch_mode, LaunchMode::Print);
        assert_eq!(config.camera_permission, PermissionMode::Denied);
        assert!(config.verbose_logging);
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = Config::default()
            .with_env_overrides(|k| (k == "REQUEST_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::default()
            .with_env_overrides(|k| (k == "REQUEST_TIMEOUT_SECS").then(|| "0".to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { ref key, .. } if key == "REQUEST_TIMEOUT_SECS"));

        let err = Config::from_toml_str("request_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { ref key, .. } if key == "request_timeout_secs"));
    }
}
