//! 终端命令解析
//!
//! 以 `/` 开头的是命令，其余整行都当作问题

use std::path::PathBuf;

/// 示例问题
pub const SAMPLE_QUERIES: [&str; 5] = [
    "What is covered under this policy?",
    "What are the exclusions and limitations?",
    "What conditions apply to this coverage?",
    "What is the waiting period for pre-existing conditions?",
    "What are the claim submission requirements?",
];

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/url <URL>`
    AttachUrl(String),
    /// `/file <路径>`
    AttachFile(PathBuf),
    /// 普通文本
    Ask(String),
    /// `/sample <序号>`，序号从 1 开始
    Sample(usize),
    /// `/samples`
    Samples,
    /// `/status`
    Status,
    /// `/health`
    Health,
    /// `/help`
    Help,
    /// `/quit` 或 `/exit`
    Quit,
    /// 空行
    Empty,
    /// 无法识别的命令，附带原因
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            // URL 是否为空交给文档来源解析去判断
            "url" => Command::AttachUrl(arg.to_string()),
            "file" if arg.is_empty() => Command::Invalid("用法: /file <路径>".to_string()),
            "file" => Command::AttachFile(PathBuf::from(arg)),
            "ask" => Command::Ask(arg.to_string()),
            "sample" => match arg.parse::<usize>() {
                Ok(n) if (1..=SAMPLE_QUERIES.len()).contains(&n) => Command::Sample(n),
                _ => Command::Invalid(format!(
                    "用法: /sample <1-{}>",
                    SAMPLE_QUERIES.len()
                )),
            },
            "samples" => Command::Samples,
            "status" => Command::Status,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Invalid(format!("未知命令: /{}", other)),
        }
    }
}

/// 帮助文本
pub const HELP_TEXT: &str = "\
命令:
  /url <URL>        从 URL 挂载文档
  /file <路径>      上传本地 PDF / DOCX
  /samples          列出示例问题
  /sample <序号>    提交示例问题
  /status           查看会话与服务端状态
  /health           服务端健康检查
  /help             显示本帮助
  /quit             退出
其它任何输入都会作为问题提交";
