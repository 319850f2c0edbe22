//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数，终端界面的"渲染"也走这里

use tracing::{info, warn};

use crate::config::Config;
use crate::models::{AnalysisResult, HealthReport, ServiceStatus};
use crate::services::result_interpreter::{
    confidence_percent, format_seconds, match_percent, ordered_evidence, status_icon,
    status_style_class, system_status, visible_conditions,
};
use crate::session::SessionState;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Policy Scanner 启动");
    info!("🌐 分析服务: {}", config.api_base_url);
    info!(
        "🕒 启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 输出一次分析结果
///
/// 证据按服务端给出的顺序输出；条件列表为空时整段省略
pub fn log_analysis_result(result: &AnalysisResult) {
    let status = result.status;
    info!("\n{}", "=".repeat(60));
    info!(
        "{} 分析结果 [{}] | 置信度 {}%",
        status_icon(status).glyph(),
        status_style_class(status),
        confidence_percent(result)
    );
    info!("问题: \"{}\"", result.query);
    info!("{}", "─".repeat(60));
    info!("{}", result.answer);

    if let Some(conditions) = visible_conditions(result) {
        info!("\n⚖️ 条件与要求:");
        for condition in conditions {
            info!("  • {}", condition);
        }
    }

    info!("\n💡 决策依据: {}", result.decision_rationale);

    let evidence = ordered_evidence(result);
    info!("\n📑 支持证据 ({} 条):", evidence.len());
    for (i, item) in evidence.iter().enumerate() {
        info!(
            "  {}. [{}] {}% 匹配 | 来源: {}",
            i + 1,
            item.clause_id,
            match_percent(item),
            item.source
        );
        info!("     \"{}\"", truncate_text(&item.text, 240));
        if let Some(section) = &item.section {
            info!("     章节: {}", section);
        }
    }

    info!("{}", "─".repeat(60));
    if let Some(seconds) = result.processing_time_seconds {
        info!("⏱️ 处理耗时: {}", format_seconds(seconds));
    }
    if let Some(tokens) = result.token_usage {
        info!("🔢 本次 token: {}", tokens);
    }
    info!("{}", "=".repeat(60));
}

/// 输出会话状态（以及服务端状态，如果拿到了）
pub fn log_session_status(state: &SessionState, service: Option<&ServiceStatus>) {
    let status = system_status(state);
    info!("\n{}", "─".repeat(60));
    info!("📊 系统状态: {} | {}", status.label(), status.description());
    match &state.document {
        Some(document) => info!(
            "📄 文档: {} ({}) | 挂载于 {}",
            document.display_name,
            document.origin,
            document.attached_at.format("%H:%M:%S")
        ),
        None => info!("📄 文档: 无"),
    }
    info!(
        "⚙️ 分析: {}",
        if state.in_flight { "进行中" } else { "空闲" }
    );
    if let Some(latency) = state.last_latency_seconds {
        info!("⚡ 最近一次提问: {}", format_seconds(latency));
    }
    info!("🔢 累计 token: {}", state.cumulative_tokens);

    if let Some(service) = service {
        info!(
            "🛰️ 服务端: 文档已加载={} | 切块={} | 索引={} | 服务可用={}",
            service.documents_loaded,
            service.chunks_count,
            service.index_built,
            service.services_available
        );
    }
    info!("{}", "─".repeat(60));
}

/// 输出健康检查结果
pub fn log_health(report: &HealthReport) {
    if report.is_healthy() {
        info!("✅ 服务健康 ({})", report.timestamp.as_deref().unwrap_or("-"));
    } else {
        warn!("⚠️ 服务状态: {}", report.status);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
