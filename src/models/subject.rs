use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 内置科目映射：科目名称 → 题库资源
static DEFAULT_SUBJECTS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Accountancy" => "accountancy_questions.csv",
    "Commerce" => "commerce_questions.csv",
};

/// 科目目录
///
/// 资源标识可以是相对路径（相对于数据目录）、绝对路径或 http(s) 地址。
/// 科目按名称排序，第一个科目即启动时默认加载的科目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCatalog {
    subjects: BTreeMap<String, String>,
}

impl Default for SubjectCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SubjectCatalog {
    /// 内置科目目录
    pub fn builtin() -> Self {
        let subjects = DEFAULT_SUBJECTS
            .entries()
            .map(|(name, path)| (name.to_string(), path.to_string()))
            .collect();
        Self { subjects }
    }

    /// 从任意 (科目, 资源) 列表构建
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            subjects: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 查找科目对应的题库资源
    pub fn resource_for(&self, subject: &str) -> Option<&str> {
        self.subjects.get(subject).map(String::as_str)
    }

    /// 按名称排序的科目列表
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// 默认科目（第一个）
    pub fn first(&self) -> Option<&str> {
        self.names().next()
    }

    /// 不区分大小写地查找科目的规范名称
    pub fn find(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if let Some((key, _)) = self.subjects.get_key_value(name) {
            return Some(key.as_str());
        }
        self.names().find(|key| key.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = SubjectCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.resource_for("Accountancy"),
            Some("accountancy_questions.csv")
        );
        assert_eq!(catalog.resource_for("Commerce"), Some("commerce_questions.csv"));
        assert_eq!(catalog.resource_for("History"), None);
    }

    #[test]
    fn test_names_are_sorted() {
        let catalog = SubjectCatalog::from_entries([("Physics", "p.csv"), ("Biology", "b.csv")]);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Biology", "Physics"]);
        assert_eq!(catalog.first(), Some("Biology"));
    }

    #[test]
    fn test_find_ignores_case() {
        let catalog = SubjectCatalog::builtin();
        assert_eq!(catalog.find("commerce"), Some("Commerce"));
        assert_eq!(catalog.find(" Accountancy "), Some("Accountancy"));
        assert_eq!(catalog.find("Chemistry"), None);
    }
}
