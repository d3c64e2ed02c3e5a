//! 题库读取器 - 基础设施层
//!
//! 持有 HTTP 客户端和数据目录，只暴露"按资源标识读取文本"的能力

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::fs;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LoadError;

/// 题库来源
///
/// 会话只依赖这个能力，测试中可以替换为内存实现。
pub trait QuestionSource {
    /// 读取资源的完整文本
    fn fetch(&self, resource: &str) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// 资源位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Url(String),
    File(PathBuf),
}

/// 题库读取器
///
/// 职责：
/// - 本地路径：相对路径以数据目录为根，通过 tokio::fs 读取
/// - http(s) 地址：通过 reqwest 读取，非 2xx 状态视为失败
/// - 不认识题目 / 科目
pub struct SourceFetcher {
    client: Client,
    data_dir: PathBuf,
}

impl SourceFetcher {
    /// 创建新的题库读取器
    pub fn new(data_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("HTTP 客户端创建失败，使用默认配置（无超时）: {}", e);
                Client::new()
            }
        };
        Self {
            client,
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_dir, Duration::from_secs(config.fetch_timeout_secs))
    }

    /// 解析资源标识
    pub fn locate(&self, resource: &str) -> ResourceLocation {
        let resource = resource.trim();
        if resource.starts_with("http://") || resource.starts_with("https://") {
            return ResourceLocation::Url(resource.to_string());
        }
        let path = Path::new(resource);
        if path.is_absolute() {
            ResourceLocation::File(path.to_path_buf())
        } else {
            ResourceLocation::File(self.data_dir.join(path))
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String, LoadError> {
        debug!("请求题库: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_file(&self, path: &Path) -> Result<String, LoadError> {
        debug!("读取题库文件: {}", path.display());
        fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::read_failed(path.display().to_string(), e))
    }
}

impl QuestionSource for SourceFetcher {
    async fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        match self.locate(resource) {
            ResourceLocation::Url(url) => self.fetch_url(&url).await,
            ResourceLocation::File(path) => self.fetch_file(&path).await,
        }
    }
}
