//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：会话日志、科目目录、题库读取器
//! 2. **命令循环**：逐行读取终端输入，交给 `SessionFlow` 解析并执行
//! 3. **容错**：任何命令错误只显示给用户，不会结束会话

use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::SourceFetcher;
use crate::models::loaders::load_subject_catalog;
use crate::models::subject::SubjectCatalog;
use crate::utils::logging::{append_log_line, init_log_file, log_shutdown, log_startup};
use crate::workflow::session_flow::{Reply, SessionFlow};

const PROMPT: &str = "> ";

/// 应用主结构
pub struct App {
    config: Config,
    flow: SessionFlow<SourceFetcher>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        // 科目目录：映射文件优先，否则使用内置目录
        let catalog = load_subject_catalog(Path::new(&config.subjects_file))
            .await?
            .unwrap_or_else(SubjectCatalog::builtin);

        log_startup(&config.school_name, catalog.len());

        let fetcher = SourceFetcher::from_config(&config);
        let today = chrono::Local::now().date_naive();
        let flow = SessionFlow::new(fetcher, catalog, &config, today);

        Ok(Self { config, flow })
    }

    /// 运行命令循环，直到 `quit` 或输入结束
    pub async fn run(mut self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let start_screen = self.flow.start().await;
        write_block(&mut stdout, &start_screen).await?;
        write_block(&mut stdout, "Type help for a list of commands.").await?;

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                debug!("输入结束");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            if let Err(e) = append_log_line(&self.config.output_log_file, line.trim()) {
                warn!("写入会话日志失败: {}", e);
            }

            match self.flow.handle_line(&line).await {
                Ok(Reply::Show(text)) => write_block(&mut stdout, &text).await?,
                Ok(Reply::Quit) => break,
                Err(AppError::Command(e)) => {
                    debug!("无法解析的命令: {}", e);
                    write_block(&mut stdout, &e.to_string()).await?;
                }
                Err(e) => {
                    warn!("命令执行失败: {}", e);
                    write_block(&mut stdout, &e.to_string()).await?;
                }
            }
        }

        log_shutdown(self.flow.papers_generated(), &self.config.output_log_file);
        Ok(())
    }
}

async fn write_block<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.trim_end().as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
