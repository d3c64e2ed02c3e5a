use crate::services::print_service::PrintFormat;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库文件所在目录（相对路径的资源以此为根）
    pub data_dir: String,
    /// 科目映射 TOML 文件（可选，存在时覆盖内置映射）
    pub subjects_file: String,
    /// 学校名称（试卷标题）
    pub school_name: String,
    /// 考试名称（试卷副标题前缀）
    pub exam_label: String,
    /// 打印输出目录
    pub output_dir: String,
    /// 打印格式
    pub print_format: PrintFormat,
    /// 网络题库请求超时（秒）
    pub fetch_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            subjects_file: "subjects.toml".to_string(),
            school_name: "Ashram Matriculation Higher Secondary School".to_string(),
            exam_label: "One Mark Test".to_string(),
            output_dir: "output_papers".to_string(),
            print_format: PrintFormat::Html,
            fetch_timeout_secs: 15,
            verbose_logging: false,
            output_log_file: "session_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or(default.data_dir),
            subjects_file: std::env::var("SUBJECTS_FILE").unwrap_or(default.subjects_file),
            school_name: std::env::var("SCHOOL_NAME").unwrap_or(default.school_name),
            exam_label: std::env::var("EXAM_LABEL").unwrap_or(default.exam_label),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            print_format: std::env::var("PRINT_FORMAT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.print_format),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
