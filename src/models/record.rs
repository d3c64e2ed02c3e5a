use serde::{Deserialize, Serialize};

/// 题库表头字段（顺序固定）
pub const FIELD_UNIT: &str = "Unit";
pub const FIELD_QUESTION_TEXT: &str = "Question Text";
pub const FIELD_OPTION_A: &str = "Option A";
pub const FIELD_OPTION_B: &str = "Option B";
pub const FIELD_OPTION_C: &str = "Option C";
pub const FIELD_OPTION_D: &str = "Option D";

/// 标准题库表头
pub const STANDARD_HEADER: [&str; 6] = [
    FIELD_UNIT,
    FIELD_QUESTION_TEXT,
    FIELD_OPTION_A,
    FIELD_OPTION_B,
    FIELD_OPTION_C,
    FIELD_OPTION_D,
];

/// 表格中的一行：字段名 → 值，保持表头顺序
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    fields: Vec<(String, String)>,
}

impl TableRow {
    /// 按位置将表头与值配对，两者长度必须一致
    pub fn from_pairs(headers: &[String], values: Vec<String>) -> Self {
        debug_assert_eq!(headers.len(), values.len());
        Self {
            fields: headers.iter().cloned().zip(values).collect(),
        }
    }

    /// 按字段名取值（同名字段取第一个）
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// 一道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub unit: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
}

impl QuestionRecord {
    /// 从表格行构建题目
    ///
    /// 缺失的字段视为空字符串，与按位置匹配表头的宽松策略一致。
    pub fn from_row(row: &TableRow) -> Self {
        let field = |name: &str| row.get(name).unwrap_or_default().to_string();
        Self {
            unit: field(FIELD_UNIT),
            question_text: field(FIELD_QUESTION_TEXT),
            option_a: field(FIELD_OPTION_A),
            option_b: field(FIELD_OPTION_B),
            option_c: field(FIELD_OPTION_C),
            option_d: field(FIELD_OPTION_D),
        }
    }

    /// 四个选项，按 (a)–(d) 顺序
    pub fn options(&self) -> [(char, &str); 4] {
        [
            ('a', self.option_a.as_str()),
            ('b', self.option_b.as_str()),
            ('c', self.option_c.as_str()),
            ('d', self.option_d.as_str()),
        ]
    }
}
