//! 选题引擎 - 业务能力层
//!
//! 只负责"按单元筛选 + 可选打乱顺序"，不关心题库来自哪里、试卷如何排版

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SelectionError;
use crate::models::record::QuestionRecord;

/// 选题条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// 选中的单元
    pub units: BTreeSet<String>,
    /// 是否打乱顺序
    pub shuffle: bool,
    /// 试卷日期
    pub date: chrono::NaiveDate,
}

impl SelectionCriteria {
    pub fn new(date: chrono::NaiveDate) -> Self {
        Self {
            units: BTreeSet::new(),
            shuffle: false,
            date,
        }
    }
}

/// 统计属于选中单元的题目数
pub fn count_matching(records: &[QuestionRecord], units: &BTreeSet<String>) -> usize {
    records.iter().filter(|r| units.contains(&r.unit)).count()
}

/// 按单元筛选题目，保持原始顺序
pub fn filter_by_units(records: &[QuestionRecord], units: &BTreeSet<String>) -> Vec<QuestionRecord> {
    records
        .iter()
        .filter(|r| units.contains(&r.unit))
        .cloned()
        .collect()
}

/// 选题
///
/// # 参数
/// - `records`: 当前科目的全部题目
/// - `units`: 允许的单元，不能为空
/// - `shuffle`: 是否打乱顺序
/// - `rng`: 随机数源
///
/// # 返回
/// 属于选中单元的题目；未选中任何单元时返回 `SelectionError::NoUnitsSelected`。
/// 打乱使用 Fisher–Yates，所有排列出现的概率相同。
pub fn select_questions<R: Rng + ?Sized>(
    records: &[QuestionRecord],
    units: &BTreeSet<String>,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<QuestionRecord>, SelectionError> {
    if units.is_empty() {
        return Err(SelectionError::NoUnitsSelected);
    }

    let mut selected = filter_by_units(records, units);
    if shuffle {
        selected.shuffle(rng);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn record(unit: &str, text: &str) -> QuestionRecord {
        QuestionRecord {
            unit: unit.to_string(),
            question_text: text.to_string(),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
        }
    }

    fn units(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Vec<QuestionRecord> {
        vec![
            record("1", "q1"),
            record("2", "q2"),
            record("3", "q3"),
            record("1", "q4"),
            record("3", "q5"),
            record("4", "q6"),
        ]
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&sample(), &units(&["1", "3"]), false, &mut rng).unwrap();
        let texts: Vec<&str> = selected.iter().map(|r| r.question_text.as_str()).collect();
        assert_eq!(texts, vec!["q1", "q3", "q4", "q5"]);
    }

    #[test]
    fn test_empty_selection_is_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = select_questions(&sample(), &BTreeSet::new(), false, &mut rng);
        assert_eq!(result, Err(SelectionError::NoUnitsSelected));
    }

    #[test]
    fn test_unknown_unit_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&sample(), &units(&["9"]), true, &mut rng).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_count_matches_filter_len() {
        let records = sample();
        for ids in [&["1"][..], &["2", "4"], &["1", "2", "3", "4"], &["7"]] {
            let set = units(ids);
            assert_eq!(count_matching(&records, &set), filter_by_units(&records, &set).len());
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let records = sample();
        let set = units(&["1", "2", "3", "4"]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let mut shuffled = select_questions(&records, &set, true, &mut rng).unwrap();
            assert_eq!(shuffled.len(), records.len());
            shuffled.sort_by(|a, b| a.question_text.cmp(&b.question_text));
            assert_eq!(shuffled, records);
        }
    }

    #[test]
    fn test_shuffle_single_question() {
        let mut rng = StdRng::seed_from_u64(1);
        let records = vec![record("1", "only")];
        let selected = select_questions(&records, &units(&["1"]), true, &mut rng).unwrap();
        assert_eq!(selected, records);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        let records = vec![record("1", "a"), record("1", "b"), record("1", "c")];
        let set = units(&["1"]);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        let trials = 6000;

        for _ in 0..trials {
            let selected = select_questions(&records, &set, true, &mut rng).unwrap();
            let order = selected.into_iter().map(|r| r.question_text).collect();
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..1200).contains(count), "skewed count: {}", count);
        }
    }
}
