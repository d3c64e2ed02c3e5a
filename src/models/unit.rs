//! 单元（题目分类）
//!
//! 单元不单独存储，而是从当前题库中推导出来，用于生成可勾选的单元列表。

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::record::QuestionRecord;

/// 比较两个单元编号
///
/// 数字编号按数值升序；无法解析为数字的编号排在数字之后，按字典序。
pub fn compare_units(a: &str, b: &str) -> Ordering {
    match (parse_unit(a), parse_unit(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// 解析编号开头的整数部分（"3" → 3, "12a" → 12）
fn parse_unit(unit: &str) -> Option<i64> {
    let trimmed = unit.trim();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// 从题目中推导去重并排序后的单元列表
pub fn derive_units(records: &[QuestionRecord]) -> Vec<String> {
    let distinct: BTreeSet<&str> = records.iter().map(|r| r.unit.as_str()).collect();
    let mut units: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    units.sort_by(|a, b| compare_units(a, b));
    units
}

/// 单元的显示标签
pub fn unit_label(unit: &str) -> String {
    format!("Unit {}", unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(unit: &str) -> QuestionRecord {
        QuestionRecord {
            unit: unit.to_string(),
            question_text: format!("q{}", unit),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
        }
    }

    #[test]
    fn test_units_sorted_numerically() {
        let records = vec![record("10"), record("2"), record("1")];
        assert_eq!(derive_units(&records), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_units_are_distinct() {
        let records = vec![record("3"), record("1"), record("3"), record("1")];
        assert_eq!(derive_units(&records), vec!["1", "3"]);
    }

    #[test]
    fn test_non_numeric_units_after_numeric() {
        let records = vec![record("B"), record("12"), record("A"), record("9")];
        assert_eq!(derive_units(&records), vec!["9", "12", "A", "B"]);
    }

    #[test]
    fn test_leading_integer_prefix() {
        assert_eq!(compare_units("12a", "3"), Ordering::Greater);
        assert_eq!(parse_unit("-2"), Some(-2));
        assert_eq!(parse_unit(""), None);
    }

    #[test]
    fn test_empty_records_have_no_units() {
        assert!(derive_units(&[]).is_empty());
    }

    #[test]
    fn test_unit_label() {
        assert_eq!(unit_label("4"), "Unit 4");
    }
}
