//! 出卷会话状态
//!
//! 会话独占当前科目的题目。每次加载都会整体替换题目集合，从不合并；
//! 加载结果只有在其代次与当前代次一致时才会被采用。

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, error, warn};

use crate::error::{LoadError, SelectionError};
use crate::models::record::QuestionRecord;
use crate::models::subject::SubjectCatalog;
use crate::models::unit::derive_units;
use crate::services::csv_parser::parse_records;
use crate::services::paper_renderer::{GeneratedPaper, PaperRenderer, NO_UNITS_MESSAGE};
use crate::services::selection::{count_matching, select_questions, SelectionCriteria};
use crate::utils::logging::log_subject_loaded;

/// 当前视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// 选题界面
    #[default]
    Controls,
    /// 试卷界面
    Paper,
}

/// 题库加载状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

/// 试卷界面的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperContent {
    Paper(GeneratedPaper),
    /// 阻断提示（未选择单元）
    Blocked(String),
}

/// 一次加载请求的凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub subject: String,
    /// 科目对应的资源；未知科目为 `None`
    pub resource: Option<String>,
}

/// 加载结果的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { records: usize, units: usize },
    Failed,
    /// 已有更新的加载请求，本结果被丢弃
    Stale,
}

/// 加载失败时替代单元列表的提示
pub fn load_error_message(subject: &str) -> String {
    format!(
        "Error loading questions for {}. Please try again later.",
        subject
    )
}

/// 出卷会话
#[derive(Debug, Clone)]
pub struct Session {
    catalog: SubjectCatalog,
    subject: Option<String>,
    records: Arc<[QuestionRecord]>,
    units: Vec<String>,
    criteria: SelectionCriteria,
    status: LoadStatus,
    view: View,
    paper: Option<PaperContent>,
    generation: u64,
}

impl Session {
    /// 创建新会话，试卷日期默认为 `today`
    pub fn new(catalog: SubjectCatalog, today: NaiveDate) -> Self {
        Self {
            catalog,
            subject: None,
            records: Arc::from(Vec::new()),
            units: Vec::new(),
            criteria: SelectionCriteria::new(today),
            status: LoadStatus::Idle,
            view: View::Controls,
            paper: None,
            generation: 0,
        }
    }

    // ========== 查询 ==========

    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// 可选单元（数值升序）
    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn criteria(&self) -> &SelectionCriteria {
        &self.criteria
    }

    pub fn is_unit_selected(&self, unit: &str) -> bool {
        self.criteria.units.contains(unit)
    }

    /// "全选"勾选框的状态
    pub fn all_selected(&self) -> bool {
        !self.units.is_empty() && self.units.iter().all(|u| self.is_unit_selected(u))
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn paper(&self) -> Option<&PaperContent> {
        self.paper.as_ref()
    }

    /// 总分：当前选中单元下的题目数
    pub fn total_marks(&self) -> usize {
        count_matching(&self.records, &self.criteria.units)
    }

    /// 生成按钮是否可用
    pub fn can_generate(&self) -> bool {
        self.total_marks() > 0
    }

    // ========== 加载 ==========

    /// 开始加载科目
    ///
    /// 代次加一，题目和选择立即失效，直到加载结果被采用。
    pub fn begin_load(&mut self, subject: &str) -> LoadTicket {
        self.generation += 1;
        let resource = self.catalog.resource_for(subject).map(str::to_string);
        if resource.is_none() {
            warn!("未找到科目对应的题库: {}", subject);
        }

        self.subject = Some(subject.to_string());
        self.records = Arc::from(Vec::new());
        self.units.clear();
        self.criteria.units.clear();
        self.status = LoadStatus::Loading;

        debug!("开始加载 [{}] (代次 {})", subject, self.generation);
        LoadTicket {
            generation: self.generation,
            subject: subject.to_string(),
            resource,
        }
    }

    /// 处理加载结果
    pub fn complete_load(&mut self, ticket: &LoadTicket, result: Result<String, LoadError>) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                "丢弃过期的加载结果 [{}] (代次 {} / 当前 {})",
                ticket.subject, ticket.generation, self.generation
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(text) => {
                let records = parse_records(&text, &ticket.subject);
                self.replace_records(records);
                self.status = LoadStatus::Ready;
                log_subject_loaded(&ticket.subject, self.records.len(), self.units.len());
                LoadOutcome::Applied {
                    records: self.records.len(),
                    units: self.units.len(),
                }
            }
            Err(e) => {
                error!("加载题库失败 [{}]: {}", ticket.subject, e);
                self.replace_records(Vec::new());
                self.status = LoadStatus::Failed {
                    message: load_error_message(&ticket.subject),
                };
                LoadOutcome::Failed
            }
        }
    }

    /// 整体替换题目，重新推导单元并清空选择
    fn replace_records(&mut self, records: Vec<QuestionRecord>) {
        self.units = derive_units(&records);
        self.records = Arc::from(records);
        self.criteria.units.clear();
    }

    // ========== 选择 ==========

    /// 勾选或取消单元，返回单元是否存在
    pub fn set_unit(&mut self, unit: &str, checked: bool) -> bool {
        if !self.units.iter().any(|u| u == unit) {
            return false;
        }
        if checked {
            self.criteria.units.insert(unit.to_string());
        } else {
            self.criteria.units.remove(unit);
        }
        true
    }

    /// 全选 / 全不选
    pub fn set_all_units(&mut self, checked: bool) {
        if checked {
            self.criteria.units = self.units.iter().cloned().collect::<BTreeSet<_>>();
        } else {
            self.criteria.units.clear();
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.criteria.date = date;
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.criteria.shuffle = shuffle;
    }

    // ========== 视图 ==========

    /// 生成试卷并切换到试卷界面
    ///
    /// 未选择单元时同样切换，但只显示阻断提示。
    pub fn generate<R: Rng + ?Sized>(&mut self, renderer: &PaperRenderer, rng: &mut R) -> &PaperContent {
        let subject = self.subject.clone().unwrap_or_default();
        let content = match select_questions(
            &self.records,
            &self.criteria.units,
            self.criteria.shuffle,
            rng,
        ) {
            Ok(questions) => PaperContent::Paper(renderer.compose(&subject, self.criteria.date, questions)),
            Err(SelectionError::NoUnitsSelected) => {
                warn!("未选择任何单元");
                PaperContent::Blocked(NO_UNITS_MESSAGE.to_string())
            }
        };

        self.view = View::Paper;
        self.paper.insert(content)
    }

    /// 返回选题界面
    pub fn back(&mut self) {
        self.view = View::Controls;
    }

    /// 当前可打印的试卷
    pub fn printable_paper(&self) -> Option<&GeneratedPaper> {
        match (&self.view, &self.paper) {
            (View::Paper, Some(PaperContent::Paper(paper))) => Some(paper),
            _ => None,
        }
    }
}
