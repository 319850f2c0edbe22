//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把终端输入调度到分析会话上，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 终端应用
//! - 管理应用生命周期（初始化、运行）
//! - 逐行读取命令并顺序执行
//! - 输出分析结果和会话状态
//!
//! ### `command` - 命令解析
//! - 把一行输入解析为 `Command`
//! - 维护示例问题列表
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理一行行输入)
//!     ↓
//! workflow::AnalysisSession (处理一次上传 / 提问)
//!     ↓
//! services (能力层：来源解析 / 上传 / 提问 / 解读)
//!     ↓
//! clients + session (分析服务契约 / 会话状态)
//!     ↓
//! infrastructure (基础设施：HttpTransport)
//! ```

pub mod app;
pub mod command;

// 重新导出主要类型
pub use app::{App, Flow};
pub use command::{Command, SAMPLE_QUERIES};
