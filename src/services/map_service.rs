//! 地图跳转服务

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::UrlLauncher;

pub struct MapService {
    launcher: Arc<dyn UrlLauncher>,
    search_url: String,
}

impl MapService {
    pub fn new(launcher: Arc<dyn UrlLauncher>, config: &Config) -> Self {
        Self {
            launcher,
            search_url: config.maps_search_url.clone(),
        }
    }

    /// 拼接地图搜索链接，坐标原样附加
    pub fn map_url(&self, coordinates: &str) -> String {
        format!("{}{}", self.search_url, coordinates)
    }

    /// 以坐标为中心打开地图
    pub async fn open(&self, coordinates: &str) -> AppResult<String> {
        let url = self.map_url(coordinates);
        info!("📍 下一个地点: {}", coordinates);
        self.launcher.launch(&url).await?;
        Ok(url)
    }
}
