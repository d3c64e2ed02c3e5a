//! 试卷排版 - 业务能力层
//!
//! 只负责把"已选好的题目 + 抬头信息"排成可阅读、可打印的文档

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

use crate::config::Config;
use crate::models::record::QuestionRecord;

/// 试卷日期格式：日/月/年，两位日和月
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// 未选择单元时显示的提示
pub const NO_UNITS_MESSAGE: &str = "Please select at least one unit.";

const RULE_WIDTH: usize = 60;

/// 格式化试卷日期（例如 25/12/2024）
pub fn format_paper_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 已生成的试卷
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPaper {
    pub school_name: String,
    pub exam_label: String,
    pub subject: String,
    pub date: NaiveDate,
    pub questions: Vec<QuestionRecord>,
}

impl GeneratedPaper {
    /// 总分（每题一分）
    pub fn total_marks(&self) -> usize {
        self.questions.len()
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.exam_label, self.subject)
    }

    pub fn formatted_date(&self) -> String {
        format_paper_date(self.date)
    }
}

/// 试卷排版器
#[derive(Debug, Clone)]
pub struct PaperRenderer {
    school_name: String,
    exam_label: String,
}

impl PaperRenderer {
    pub fn new(school_name: impl Into<String>, exam_label: impl Into<String>) -> Self {
        Self {
            school_name: school_name.into(),
            exam_label: exam_label.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.school_name.clone(), config.exam_label.clone())
    }

    /// 组装试卷
    pub fn compose(&self, subject: &str, date: NaiveDate, questions: Vec<QuestionRecord>) -> GeneratedPaper {
        GeneratedPaper {
            school_name: self.school_name.clone(),
            exam_label: self.exam_label.clone(),
            subject: subject.to_string(),
            date,
            questions,
        }
    }
}

/// 纯文本排版（终端显示、文本打印）
pub fn render_text(paper: &GeneratedPaper) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", paper.school_name);
    let _ = writeln!(out, "{}", paper.title());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Date: {:<24}Total mark: {}",
        paper.formatted_date(),
        paper.total_marks()
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for (index, question) in paper.questions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, question.question_text);
        for (label, option) in question.options() {
            let _ = writeln!(out, "   ({}) {}", label, option);
        }
        let _ = writeln!(out);
    }
    out
}

/// 未选择单元时的阻断提示（文本）
pub fn render_blocked_text(message: &str) -> String {
    format!("\n    {}\n", message)
}

/// 转义 HTML 特殊字符
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 可打印的 HTML 文档
///
/// 只包含抬头、日期/总分和题目列表，不含任何操作控件。
pub fn render_html(paper: &GeneratedPaper) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&paper.title()));
    let _ = writeln!(
        out,
        "<style>body{{font-family:serif;margin:2em}}header{{text-align:center}}\
         .meta{{display:flex;justify-content:space-between;font-weight:600}}\
         ol li{{margin-bottom:1.2em;break-inside:avoid}}\
         .options{{display:grid;grid-template-columns:1fr 1fr;gap:.3em 2em}}</style>"
    );
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<header>");
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(&paper.school_name));
    let _ = writeln!(out, "<h3>{}</h3>", escape_html(&paper.title()));
    let _ = writeln!(out, "</header>");
    let _ = writeln!(out, "<div class=\"meta\">");
    let _ = writeln!(out, "<span>Date: {}</span>", paper.formatted_date());
    let _ = writeln!(out, "<span>Total mark: {}</span>", paper.total_marks());
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "<hr>");
    let _ = writeln!(out, "<ol>");
    for question in &paper.questions {
        let _ = writeln!(out, "<li>");
        let _ = writeln!(out, "<strong>{}</strong>", escape_html(&question.question_text));
        let _ = writeln!(out, "<div class=\"options\">");
        for (label, option) in question.options() {
            let _ = writeln!(out, "<span>({}) {}</span>", label, escape_html(option));
        }
        let _ = writeln!(out, "</div>");
        let _ = writeln!(out, "</li>");
    }
    let _ = writeln!(out, "</ol>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(unit: &str, text: &str, opts: [&str; 4]) -> QuestionRecord {
        QuestionRecord {
            unit: unit.to_string(),
            question_text: text.to_string(),
            option_a: opts[0].to_string(),
            option_b: opts[1].to_string(),
            option_c: opts[2].to_string(),
            option_d: opts[3].to_string(),
        }
    }

    fn paper(questions: Vec<QuestionRecord>) -> GeneratedPaper {
        let renderer = PaperRenderer::new("Test School", "One Mark Test");
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        renderer.compose("Accountancy", date, questions)
    }

    #[test]
    fn test_date_is_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_paper_date(date), "05/03/2024");
    }

    #[test]
    fn test_render_text() {
        let p = paper(vec![record("1", "What is 2+2?", ["3", "4", "5", "6"])]);
        let text = render_text(&p);

        assert!(text.starts_with("Test School\nOne Mark Test - Accountancy\n"));
        assert!(text.contains("Date: 25/12/2024"));
        assert!(text.contains("Total mark: 1"));
        assert!(text.contains("1. What is 2+2?\n   (a) 3\n   (b) 4\n   (c) 5\n   (d) 6\n"));
    }

    #[test]
    fn test_total_marks_equals_question_count() {
        let p = paper(vec![
            record("1", "q1", ["a", "b", "c", "d"]),
            record("2", "q2", ["a", "b", "c", "d"]),
            record("2", "q3", ["a", "b", "c", "d"]),
        ]);
        assert_eq!(p.total_marks(), 3);
        assert!(render_text(&p).contains("3. q3"));
    }

    #[test]
    fn test_render_html_escapes_and_has_no_controls() {
        let p = paper(vec![record("1", "Is 1 < 2 & 3 > 2?", ["yes", "no", "\"maybe\"", "n/a"])]);
        let html = render_html(&p);

        assert!(html.contains("<h2>Test School</h2>"));
        assert!(html.contains("<h3>One Mark Test - Accountancy</h3>"));
        assert!(html.contains("Is 1 &lt; 2 &amp; 3 &gt; 2?"));
        assert!(html.contains("<span>(c) &quot;maybe&quot;</span>"));
        assert!(html.contains("<span>Total mark: 1</span>"));
        assert!(!html.contains("<button"));
        assert!(!html.contains("<input"));
    }

    #[test]
    fn test_blocked_message() {
        assert!(render_blocked_text(NO_UNITS_MESSAGE).contains("Please select at least one unit."));
    }
}
