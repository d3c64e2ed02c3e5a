//! 打印服务 - 业务能力层
//!
//! 只负责"把已生成的试卷写成可打印文件"，不关心选题流程

use std::path::PathBuf;
use std::str::FromStr;

use tokio::fs;
use tracing::{debug, info};

use crate::error::RenderError;
use crate::services::paper_renderer::{render_html, render_text, GeneratedPaper};

/// 打印格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl PrintFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PrintFormat::Html => "html",
            PrintFormat::Text => "txt",
            PrintFormat::Json => "json",
        }
    }
}

impl FromStr for PrintFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(PrintFormat::Html),
            "text" | "txt" => Ok(PrintFormat::Text),
            "json" => Ok(PrintFormat::Json),
            other => Err(format!("unknown print format: {}", other)),
        }
    }
}

/// 打印服务
///
/// 职责：
/// - 按配置格式排版试卷
/// - 写入输出目录
/// - 输出中不包含任何交互控件
pub struct PrintService {
    output_dir: PathBuf,
    format: PrintFormat,
}

impl PrintService {
    pub fn new(output_dir: impl Into<PathBuf>, format: PrintFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    /// 按打印格式排版
    pub fn render(&self, paper: &GeneratedPaper) -> Result<String, RenderError> {
        match self.format {
            PrintFormat::Html => Ok(render_html(paper)),
            PrintFormat::Text => Ok(render_text(paper)),
            PrintFormat::Json => Ok(serde_json::to_string_pretty(paper)?),
        }
    }

    /// 输出文件名：<科目>_<年-月-日>.<扩展名>
    pub fn file_name(&self, paper: &GeneratedPaper) -> String {
        let subject: String = paper
            .subject
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!(
            "{}_{}.{}",
            subject,
            paper.date.format("%Y-%m-%d"),
            self.format.extension()
        )
    }

    /// 打印试卷，返回写入的文件路径
    pub async fn print(&self, paper: &GeneratedPaper) -> Result<PathBuf, RenderError> {
        let content = self.render(paper)?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| RenderError::WriteFailed {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        let path = self.output_dir.join(self.file_name(paper));
        debug!("写入试卷: {} ({} 字节)", path.display(), content.len());

        fs::write(&path, content)
            .await
            .map_err(|source| RenderError::WriteFailed {
                path: path.display().to_string(),
                source,
            })?;

        info!("🖨️ 试卷已输出: {}", path.display());
        Ok(path)
    }
}
