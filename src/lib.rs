//! # Policy Scanner
//!
//! 一个把文档挂到会话上、向远程分析服务提问并解读结构化答案的 Rust 客户端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP Client），只暴露能力
//! - `HttpTransport` - 唯一的 Client owner，提供 GET / POST 能力
//!
//! ### ② 契约与状态（Clients / Session）
//! - `clients/` - `AnalysisClient`，分析服务的接口契约（上传 / 提问 / 状态）
//! - `session/` - `SessionStore`，会话唯一事实来源，只有协调器能写
//!
//! ### ③ 业务能力层（Services）
//! - `DocumentSource` - URL / 文件 → 待上传文档（纯校验）
//! - `UploadCoordinator` - 上传并挂载文档（单飞）
//! - `QueryCoordinator` - 提问、测量延迟、记录结果（单飞）
//! - `result_interpreter` - 状态样式、置信度、证据顺序等纯推导
//!
//! ### ④ 流程层（Workflow）
//! - `AnalysisSession` - 组合以上能力的可注入会话对象
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/app` - 终端命令循环
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::AnalysisClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::HttpTransport;
pub use models::{AnalysisResult, AttachedDocument, CoverageStatus, Evidence, PendingDocument};
pub use orchestrator::App;
pub use session::{SessionState, SessionStore};
pub use workflow::AnalysisSession;
