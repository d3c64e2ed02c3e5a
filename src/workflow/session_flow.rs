//! 出卷流程 - 流程层
//!
//! 核心职责：把用户命令分发给对应的处理函数
//!
//! 流程顺序：
//! 1. 选择科目 → 读取题库 → 解析 → 推导单元
//! 2. 勾选单元 / 设置日期 / 打乱 → 实时更新总分
//! 3. 生成试卷 → 试卷界面 → 返回 / 打印

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, LoadError, RenderError};
use crate::infrastructure::QuestionSource;
use crate::models::subject::SubjectCatalog;
use crate::models::unit::unit_label;
use crate::services::paper_renderer::{format_paper_date, render_blocked_text, render_text, PaperRenderer};
use crate::services::print_service::PrintService;
use crate::workflow::command::{Command, HELP_TEXT};
use crate::workflow::session::{LoadOutcome, LoadStatus, PaperContent, Session, View};

/// 命令处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 显示给用户的文本
    Show(String),
    Quit,
}

/// 出卷流程
///
/// - 独占会话状态
/// - 只通过 `QuestionSource` 读取题库
/// - 不直接读写终端
pub struct SessionFlow<S: QuestionSource> {
    source: S,
    session: Session,
    renderer: PaperRenderer,
    printer: PrintService,
    rng: StdRng,
    today: NaiveDate,
    papers_generated: usize,
}

impl<S: QuestionSource> SessionFlow<S> {
    /// 创建新的出卷流程
    pub fn new(source: S, catalog: SubjectCatalog, config: &Config, today: NaiveDate) -> Self {
        Self {
            source,
            session: Session::new(catalog, today),
            renderer: PaperRenderer::from_config(config),
            printer: PrintService::new(&config.output_dir, config.print_format),
            rng: StdRng::from_entropy(),
            today,
            papers_generated: 0,
        }
    }

    /// 使用固定随机种子（打乱结果可复现）
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn papers_generated(&self) -> usize {
        self.papers_generated
    }

    /// 加载默认科目（目录中的第一个）
    pub async fn start(&mut self) -> String {
        match self.session.catalog().first().map(str::to_string) {
            Some(subject) => {
                self.load_subject(&subject).await;
            }
            None => warn!("科目目录为空"),
        }
        self.render_controls()
    }

    /// 加载科目题库
    ///
    /// 失败不会向上传播：会话进入错误状态，用户可以重新选择科目重试。
    pub async fn load_subject(&mut self, subject: &str) -> LoadOutcome {
        let ticket = self.session.begin_load(subject);
        let result = match ticket.resource.as_deref() {
            Some(resource) => self.source.fetch(resource).await,
            None => Err(LoadError::unknown_subject(subject)),
        };
        self.session.complete_load(&ticket, result)
    }

    /// 解析一行输入并执行
    ///
    /// 无法解析的输入以 `AppError::Command` 返回，会话状态不变。
    pub async fn handle_line(&mut self, line: &str) -> AppResult<Reply> {
        let command = Command::parse(line, self.today)?;
        self.dispatch(command).await
    }

    /// 分发命令
    pub async fn dispatch(&mut self, command: Command) -> AppResult<Reply> {
        let text = match command {
            Command::Subjects => self.on_subjects(),
            Command::Subject(name) => self.on_subject(&name).await,
            Command::Unit { unit, checked } => self.on_unit(&unit, checked),
            Command::All(checked) => self.on_all(checked),
            Command::Date(date) => self.on_date(date),
            Command::Shuffle(shuffle) => self.on_shuffle(shuffle),
            Command::Status => self.render_current(),
            Command::Generate => self.on_generate(),
            Command::Back => self.on_back(),
            Command::Print => self.on_print().await?,
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Show(text))
    }

    // ========== 命令处理 ==========

    fn on_subjects(&self) -> String {
        let current = self.session.subject();
        let mut out = String::new();
        for name in self.session.catalog().names() {
            let marker = if Some(name) == current { "*" } else { " " };
            let _ = writeln!(out, "{} {}", marker, name);
        }
        out
    }

    async fn on_subject(&mut self, name: &str) -> String {
        let subject = self
            .session
            .catalog()
            .find(name)
            .unwrap_or(name)
            .to_string();
        info!("📚 切换科目: {}", subject);
        self.load_subject(&subject).await;
        self.session.back();
        self.render_controls()
    }

    fn on_unit(&mut self, unit: &str, checked: Option<bool>) -> String {
        let checked = checked.unwrap_or(!self.session.is_unit_selected(unit));
        if !self.session.set_unit(unit, checked) {
            return format!("No such unit: {}\n{}", unit, self.total_line());
        }
        format!(
            "{}: {}\n{}",
            unit_label(unit),
            if checked { "on" } else { "off" },
            self.total_line()
        )
    }

    fn on_all(&mut self, checked: bool) -> String {
        self.session.set_all_units(checked);
        format!(
            "Select all: {}\n{}",
            if checked { "on" } else { "off" },
            self.total_line()
        )
    }

    fn on_date(&mut self, date: NaiveDate) -> String {
        self.session.set_date(date);
        format!("Date: {}", format_paper_date(date))
    }

    fn on_shuffle(&mut self, shuffle: bool) -> String {
        self.session.set_shuffle(shuffle);
        format!("Shuffle: {}", if shuffle { "on" } else { "off" })
    }

    fn on_generate(&mut self) -> String {
        let content = self.session.generate(&self.renderer, &mut self.rng);
        if let PaperContent::Paper(paper) = content {
            info!(
                "📝 生成试卷: {} | {} 题",
                paper.title(),
                paper.total_marks()
            );
            self.papers_generated += 1;
        }
        self.render_current()
    }

    fn on_back(&mut self) -> String {
        self.session.back();
        self.render_controls()
    }

    async fn on_print(&self) -> Result<String, RenderError> {
        let paper = self
            .session
            .printable_paper()
            .ok_or(RenderError::NothingToPrint)?;
        let path: PathBuf = self.printer.print(paper).await?;
        Ok(format!("Paper written to {}", path.display()))
    }

    // ========== 界面 ==========

    fn total_line(&self) -> String {
        format!(
            "Total marks: {} | Generate: {}",
            self.session.total_marks(),
            if self.session.can_generate() { "enabled" } else { "disabled" }
        )
    }

    /// 当前视图的文本
    pub fn render_current(&self) -> String {
        match self.session.view() {
            View::Controls => self.render_controls(),
            View::Paper => self.render_paper(),
        }
    }

    /// 选题界面
    pub fn render_controls(&self) -> String {
        let session = &self.session;
        let criteria = session.criteria();
        let mut out = String::new();

        let _ = writeln!(out, "Subject: {}", session.subject().unwrap_or("-"));
        match session.status() {
            LoadStatus::Failed { message } => {
                let _ = writeln!(out, "{}", message);
            }
            LoadStatus::Loading => {
                let _ = writeln!(out, "Loading...");
            }
            LoadStatus::Idle | LoadStatus::Ready => {
                let _ = writeln!(out, "Units:");
                for unit in session.units() {
                    let mark = if session.is_unit_selected(unit) { "x" } else { " " };
                    let _ = writeln!(out, "  [{}] {}", mark, unit_label(unit));
                }
                let _ = writeln!(
                    out,
                    "Select all: [{}]",
                    if session.all_selected() { "x" } else { " " }
                );
            }
        }
        let _ = writeln!(
            out,
            "Date: {} | Shuffle: {}",
            format_paper_date(criteria.date),
            if criteria.shuffle { "on" } else { "off" }
        );
        let _ = writeln!(out, "{}", self.total_line());
        out
    }

    /// 试卷界面
    pub fn render_paper(&self) -> String {
        match self.session.paper() {
            Some(PaperContent::Paper(paper)) => render_text(paper),
            Some(PaperContent::Blocked(message)) => render_blocked_text(message),
            None => String::new(),
        }
    }
}
