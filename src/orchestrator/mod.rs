//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层只负责启动应用和驱动命令循环，不做任何选题或排版判断。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (终端命令循环)
//!     ↓
//! workflow::SessionFlow (命令分发 + 会话状态)
//!     ↓
//! services (能力层：解析 / 选题 / 排版 / 打印)
//!     ↓
//! infrastructure (基础设施：SourceFetcher)
//! ```

pub mod app;

pub use app::App;
