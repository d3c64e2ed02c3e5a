//! 题库表格解析 - 业务能力层
//!
//! 只负责"把逗号分隔的文本变成按字段名索引的行"，不关心科目和选题
//!
//! 格式约定：
//! - 第一行为表头，其余每行一道题
//! - 字段中含逗号时必须用双引号包裹
//! - 字段数与表头不一致的行被静默丢弃
//! - 空行不产生记录

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::models::record::{QuestionRecord, TableRow, STANDARD_HEADER};
use crate::utils::logging::truncate_text;

/// 一个字段：引号包裹的内容，或不含引号和逗号的最长片段，后接逗号或行尾
fn field_regex() -> &'static Regex {
    static FIELD_RE: OnceLock<Regex> = OnceLock::new();
    FIELD_RE.get_or_init(|| {
        Regex::new(r#"^\s*(?:"([^"]*)"|([^",]*))\s*(,|$)"#).expect("field pattern is valid")
    })
}

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// 表头字段名
    pub headers: Vec<String>,
    /// 有效行
    pub rows: Vec<TableRow>,
    /// 被丢弃的非空行数
    pub dropped: usize,
}

impl ParsedTable {
    /// 表头是否为标准题库表头
    pub fn has_standard_header(&self) -> bool {
        self.headers.len() == STANDARD_HEADER.len()
            && self.headers.iter().zip(STANDARD_HEADER).all(|(h, s)| h == s)
    }

    /// 将所有行转换为题目
    pub fn to_records(&self) -> Vec<QuestionRecord> {
        self.rows.iter().map(QuestionRecord::from_row).collect()
    }
}

/// 解析表头：按逗号切分，去掉引号并去除首尾空白
fn parse_header(line: &str) -> Vec<String> {
    line.split(',')
        .map(|h| h.replace('"', "").trim().to_string())
        .collect()
}

/// 切分一行数据
///
/// 行内出现无法识别的片段（例如未闭合的引号）时返回 `None`。
pub fn split_fields(line: &str) -> Option<Vec<String>> {
    let re = field_regex();
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        let caps = re.captures(rest)?;
        let value = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        fields.push(value.trim().to_string());

        let consumed = caps.get(0).map(|m| m.end()).unwrap_or(rest.len());
        let has_more = caps.get(3).is_some_and(|sep| sep.as_str() == ",");
        if !has_more {
            break;
        }
        rest = &rest[consumed..];
    }

    Some(fields)
}

/// 解析整张表
pub fn parse_table(text: &str) -> ParsedTable {
    let text = text.trim_start_matches('\u{feff}').trim();
    let mut lines = text.lines();

    let headers = match lines.next() {
        Some(line) if !line.trim().is_empty() => parse_header(line),
        _ => return ParsedTable::default(),
    };

    let mut rows = Vec::new();
    let mut dropped = 0;

    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match split_fields(line) {
            Some(values) if values.len() == headers.len() => {
                rows.push(TableRow::from_pairs(&headers, values));
            }
            other => {
                dropped += 1;
                debug!(
                    "丢弃第 {} 行 (字段数 {:?} / 表头 {}): {}",
                    line_no + 2,
                    other.map(|v| v.len()),
                    headers.len(),
                    truncate_text(line, 60)
                );
            }
        }
    }

    ParsedTable {
        headers,
        rows,
        dropped,
    }
}

/// 解析题库文本为题目列表
///
/// `label` 只用于日志，通常是科目名。
pub fn parse_records(text: &str, label: &str) -> Vec<QuestionRecord> {
    let table = parse_table(text);
    if !table.headers.is_empty() && !table.has_standard_header() {
        warn!("[{}] 题库表头与标准表头不一致: {:?}", label, table.headers);
    }
    if table.dropped > 0 {
        debug!("[{}] 丢弃 {} 行格式不正确的数据", label, table.dropped);
    }
    table.to_records()
}
