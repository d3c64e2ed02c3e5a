use thiserror::Error;

/// 应用程序错误类型
///
/// 题库加载失败不在其中：加载失败只改变会话状态，不会向上传播。
#[derive(Debug, Error)]
pub enum AppError {
    /// 试卷输出错误
    #[error("Print failed: {0}")]
    Render(#[from] RenderError),
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// 命令解析错误
    #[error("{0}")]
    Command(#[from] CommandError),
}

/// 题库加载错误
///
/// 任何一种都不会终止会话：会话清空题目并显示错误提示。
#[derive(Debug, Error)]
pub enum LoadError {
    /// 科目未在题库映射中登记
    #[error("未知科目: {subject}")]
    UnknownSubject { subject: String },
    /// 读取本地题库文件失败
    #[error("读取题库文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 网络请求失败
    #[error("请求题库失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非成功状态码
    #[error("HTTP error! status: {status} ({url})")]
    BadStatus { url: String, status: u16 },
}

/// 选题错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// 未选择任何单元
    #[error("Please select at least one unit.")]
    NoUnitsSelected,
}

/// 试卷输出错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 当前没有可打印的试卷
    #[error("There is no generated paper to print.")]
    NothingToPrint,
    /// 写入试卷文件失败
    #[error("could not write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 试卷序列化失败
    #[error("could not serialize paper: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 科目映射文件读取失败
    #[error("could not read subjects file {path}: {source}")]
    SubjectsReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 科目映射文件解析失败
    #[error("could not parse subjects file {path}: {source}")]
    SubjectsParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 命令解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// 空输入
    #[error("Please enter a command (type help for a list).")]
    Empty,
    /// 无法识别的命令
    #[error("Unknown command: {0} (type help for a list)")]
    Unknown(String),
    /// 缺少参数
    #[error("{command}: missing argument <{expected}>")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    /// 参数格式错误
    #[error("{command}: invalid argument '{value}'")]
    InvalidArgument { command: String, value: String },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        LoadError::RequestFailed { url, source: err }
    }
}

// ========== 便捷构造函数 ==========

impl LoadError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        LoadError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建未知科目错误
    pub fn unknown_subject(subject: impl Into<String>) -> Self {
        LoadError::UnknownSubject {
            subject: subject.into(),
        }
    }
}

impl CommandError {
    pub fn missing(command: &str, expected: &'static str) -> Self {
        CommandError::MissingArgument {
            command: command.to_string(),
            expected,
        }
    }

    pub fn invalid(command: &str, value: &str) -> Self {
        CommandError::InvalidArgument {
            command: command.to_string(),
            value: value.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_converts_to_app_error() {
        let err: AppError = CommandError::Unknown("dance".into()).into();
        assert!(matches!(err, AppError::Command(CommandError::Unknown(_))));
        assert_eq!(err.to_string(), "Unknown command: dance (type help for a list)");
    }

    #[test]
    fn test_render_error_message_is_shown_in_english() {
        let err: AppError = RenderError::NothingToPrint.into();
        assert_eq!(err.to_string(), "Print failed: There is no generated paper to print.");
    }
}
