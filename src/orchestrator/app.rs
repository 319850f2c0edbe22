//! 终端应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责把用户输入变成会话操作并输出结果。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：输出启动信息、创建分析会话
//! 2. **命令循环**：逐行读取标准输入，解析为命令
//! 3. **结果输出**：成功时渲染分析结果，失败时输出类型化错误
//!
//! ## 设计特点
//!
//! - **顶层编排**：不做校验、不碰网络，全部委托给 `AnalysisSession`
//! - **顺序执行**：一次只 await 一个操作，会话的单飞约束在这里天然满足
//! - **失败不退出**：上传 / 提问失败只输出错误，会话保持原样，用户可以重新发起

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::orchestrator::command::{Command, HELP_TEXT, SAMPLE_QUERIES};
use crate::utils::logging::{
    log_analysis_result, log_health, log_session_status, log_startup,
};
use crate::workflow::AnalysisSession;

/// 命令执行后是否继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 应用主结构
pub struct App {
    session: AnalysisSession,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        let session = AnalysisSession::new(&config)?;
        Ok(Self { session })
    }

    /// 使用已有会话创建
    pub fn with_session(session: AnalysisSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// 运行应用主逻辑（读取标准输入直到 EOF 或 /quit）
    pub async fn run(&self) -> Result<()> {
        info!("{}", HELP_TEXT);
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_with(stdin).await
    }

    /// 从任意输入源读取命令
    pub async fn run_with<R: AsyncBufRead + Unpin>(&self, input: R) -> Result<()> {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.execute(Command::parse(&line)).await == Flow::Quit {
                break;
            }
        }
        info!("👋 会话结束，累计 token: {}", self.session.snapshot().cumulative_tokens);
        Ok(())
    }

    /// 执行单条命令
    pub async fn execute(&self, command: Command) -> Flow {
        match command {
            Command::AttachUrl(url) => {
                if let Err(e) = self.session.attach_url(&url).await {
                    report_failure("上传", &e);
                }
            }
            Command::AttachFile(path) => {
                if let Err(e) = self.session.attach_path(&path).await {
                    match e.downcast_ref::<AppError>() {
                        Some(app_error) => report_failure("上传", app_error),
                        None => error!("❌ 无法读取文件: {:#}", e),
                    }
                }
            }
            Command::Ask(question) => self.ask(&question).await,
            Command::Sample(n) => match n.checked_sub(1).and_then(|i| SAMPLE_QUERIES.get(i)) {
                Some(question) => {
                    info!("💬 示例问题 {}: {}", n, question);
                    self.ask(question).await;
                }
                None => warn!("⚠️ 没有第 {} 个示例问题", n),
            },
            Command::Samples => {
                for (i, question) in SAMPLE_QUERIES.iter().enumerate() {
                    info!("  {}. {}", i + 1, question);
                }
            }
            Command::Status => {
                let service = match self.session.service_status().await {
                    Ok(status) => Some(status),
                    Err(e) => {
                        warn!("⚠️ 无法获取服务端状态: {:#}", e);
                        None
                    }
                };
                log_session_status(&self.session.snapshot(), service.as_ref());
            }
            Command::Health => match self.session.health().await {
                Ok(report) => log_health(&report),
                Err(e) => error!("❌ 健康检查失败: {:#}", e),
            },
            Command::Help => info!("{}", HELP_TEXT),
            Command::Quit => return Flow::Quit,
            Command::Empty => {}
            Command::Invalid(reason) => warn!("⚠️ {}", reason),
        }
        Flow::Continue
    }

    async fn ask(&self, question: &str) {
        match self.session.ask(question).await {
            Ok(result) => log_analysis_result(&result),
            Err(e) => report_failure("分析", &e),
        }
    }
}

fn report_failure(operation: &str, err: &AppError) {
    if err.is_validation() {
        warn!("⚠️ {}: {}", operation, err);
    } else {
        error!("❌ {}失败: {}", operation, err);
    }
}
