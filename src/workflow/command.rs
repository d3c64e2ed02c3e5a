//! 用户命令
//!
//! 每条用户操作对应一个 `Command`，由 `SessionFlow::dispatch` 分发到处理函数。

use chrono::NaiveDate;

use crate::error::CommandError;

/// 用户命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 列出科目
    Subjects,
    /// 切换科目并加载题库
    Subject(String),
    /// 勾选 / 取消单元；`None` 表示反选
    Unit { unit: String, checked: Option<bool> },
    /// 全选 / 全不选
    All(bool),
    /// 设置试卷日期
    Date(NaiveDate),
    /// 是否打乱顺序
    Shuffle(bool),
    /// 显示当前界面
    Status,
    /// 生成试卷
    Generate,
    /// 返回选题界面
    Back,
    /// 打印试卷
    Print,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  subjects                 list subjects
  subject <name>           switch subject and load its questions
  unit <id> [on|off]       select / deselect a unit (toggles when omitted)
  all on|off               select all / no units
  date <YYYY-MM-DD>        paper date (dd/mm/yyyy and today also work)
  shuffle on|off           shuffle question order
  status                   show the current view
  generate                 generate the paper
  back                     return to the controls
  print                    write the paper to a printable file
  help                     show this help
  quit                     exit";

fn parse_switch(command: &str, value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "y" | "1" => Ok(true),
        "off" | "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(CommandError::invalid(command, value)),
    }
}

/// 解析试卷日期
pub fn parse_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    if value.eq_ignore_ascii_case("today") {
        return Some(today);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

impl Command {
    /// 解析一行输入，`today` 用于解析 `date today`
    pub fn parse(line: &str, today: NaiveDate) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        if name.is_empty() {
            return Err(CommandError::Empty);
        }
        let name = name.to_ascii_lowercase();
        let mut args = rest.split_whitespace();

        let command = match name.as_str() {
            "subjects" | "ls" => Command::Subjects,
            "subject" => {
                if rest.is_empty() {
                    return Err(CommandError::missing(&name, "name"));
                }
                Command::Subject(rest.to_string())
            }
            "unit" => {
                let unit = args.next().ok_or_else(|| CommandError::missing(&name, "id"))?;
                let checked = args.next().map(|v| parse_switch(&name, v)).transpose()?;
                Command::Unit {
                    unit: unit.to_string(),
                    checked,
                }
            }
            "all" => {
                let value = args.next().ok_or_else(|| CommandError::missing(&name, "on|off"))?;
                Command::All(parse_switch(&name, value)?)
            }
            "date" => {
                let value = args.next().ok_or_else(|| CommandError::missing(&name, "YYYY-MM-DD"))?;
                let date = parse_date(value, today).ok_or_else(|| CommandError::invalid(&name, value))?;
                Command::Date(date)
            }
            "shuffle" => {
                let value = args.next().ok_or_else(|| CommandError::missing(&name, "on|off"))?;
                Command::Shuffle(parse_switch(&name, value)?)
            }
            "status" | "show" => Command::Status,
            "generate" | "gen" => Command::Generate,
            "back" => Command::Back,
            "print" => Command::Print,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(line.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()
    }

    fn parse(line: &str) -> Result<Command, CommandError> {
        Command::parse(line, today())
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("generate"), Ok(Command::Generate));
        assert_eq!(parse("  BACK "), Ok(Command::Back));
        assert_eq!(parse("print"), Ok(Command::Print));
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert_eq!(parse("subjects"), Ok(Command::Subjects));
    }

    #[test]
    fn test_parse_subject_keeps_spaces() {
        assert_eq!(
            parse("subject Business Studies"),
            Ok(Command::Subject("Business Studies".to_string()))
        );
        assert!(matches!(parse("subject"), Err(CommandError::MissingArgument { .. })));
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(
            parse("unit 3 on"),
            Ok(Command::Unit {
                unit: "3".into(),
                checked: Some(true)
            })
        );
        assert_eq!(
            parse("unit 3"),
            Ok(Command::Unit {
                unit: "3".into(),
                checked: None
            })
        );
        assert!(matches!(parse("unit 3 maybe"), Err(CommandError::InvalidArgument { .. })));
    }

    #[test]
    fn test_parse_switches() {
        assert_eq!(parse("all on"), Ok(Command::All(true)));
        assert_eq!(parse("shuffle off"), Ok(Command::Shuffle(false)));
        assert!(matches!(parse("all"), Err(CommandError::MissingArgument { .. })));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse("date 2024-03-05"), Ok(Command::Date(expected)));
        assert_eq!(parse("date 05/03/2024"), Ok(Command::Date(expected)));
        assert_eq!(parse("date today"), Ok(Command::Date(today())));
        assert!(matches!(parse("date 2024-13-01"), Err(CommandError::InvalidArgument { .. })));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
    }
}
