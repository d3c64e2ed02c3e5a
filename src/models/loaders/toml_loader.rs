use crate::error::{AppResult, ConfigError};
use crate::models::subject::SubjectCatalog;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// 科目映射文件结构
///
/// ```toml
/// [subjects]
/// Accountancy = "accountancy_questions.csv"
/// Economics = "https://example.org/economics.csv"
/// ```
#[derive(Debug, Deserialize)]
struct SubjectsFile {
    #[serde(default)]
    subjects: BTreeMap<String, String>,
}

/// 解析科目映射 TOML 内容
pub fn parse_subject_catalog(content: &str, path: &str) -> Result<SubjectCatalog, ConfigError> {
    let file: SubjectsFile =
        toml::from_str(content).map_err(|source| ConfigError::SubjectsParseFailed {
            path: path.to_string(),
            source,
        })?;
    Ok(SubjectCatalog::from_entries(file.subjects))
}

/// 从 TOML 文件加载科目目录
///
/// 文件不存在时返回 `None`，由调用方回退到内置目录。
pub async fn load_subject_catalog(path: &Path) -> AppResult<Option<SubjectCatalog>> {
    if !path.exists() {
        tracing::debug!("科目映射文件不存在: {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::SubjectsReadFailed {
            path: path.display().to_string(),
            source,
        })?;

    let catalog = parse_subject_catalog(&content, &path.to_string_lossy())?;

    if catalog.is_empty() {
        tracing::warn!("科目映射文件 {} 中没有任何科目", path.display());
        return Ok(None);
    }

    tracing::info!("从 {} 加载了 {} 个科目", path.display(), catalog.len());
    Ok(Some(catalog))
}
