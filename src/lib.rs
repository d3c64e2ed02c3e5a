//! # One Mark Paper
//!
//! 从题库表格中按单元抽题，生成可打印的选择题试卷
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端和数据目录，只暴露"读取题库文本"的能力
//!
//! ### ② 业务能力层（Services）
//! - `csv_parser` - 表格解析
//! - `selection` - 按单元筛选、打乱顺序
//! - `paper_renderer` - 试卷排版（文本 / HTML）
//! - `print_service` - 输出可打印文件
//!
//! ### ③ 流程层（Workflow）
//! - `Session` - 会话状态（题目、单元、选择、视图、加载代次）
//! - `Command` / `SessionFlow` - 用户命令与分发
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 初始化与终端命令循环

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{QuestionSource, SourceFetcher};
pub use models::{QuestionRecord, SubjectCatalog};
pub use orchestrator::App;
pub use services::{GeneratedPaper, PaperRenderer};
pub use workflow::{Command, Reply, Session, SessionFlow};
