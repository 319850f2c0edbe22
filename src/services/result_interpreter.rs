//! 结果解读 - 纯函数
//!
//! 从 `AnalysisResult` / `SessionState` 推导展示层需要的事实，没有任何副作用

use std::fmt;

use crate::models::{AnalysisResult, CoverageStatus, Evidence};
use crate::session::SessionState;

/// 状态图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    CheckCircle,
    XCircle,
    AlertTriangle,
}

impl StatusIcon {
    /// 终端里显示的符号
    pub fn glyph(self) -> &'static str {
        match self {
            StatusIcon::CheckCircle => "✅",
            StatusIcon::XCircle => "❌",
            StatusIcon::AlertTriangle => "⚠️",
        }
    }
}

/// 状态样式类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Success,
    Destructive,
    Warning,
    Neutral,
}

impl StatusStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            StatusStyle::Success => "success",
            StatusStyle::Destructive => "destructive",
            StatusStyle::Warning => "warning",
            StatusStyle::Neutral => "neutral",
        }
    }
}

impl fmt::Display for StatusStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

pub fn status_icon(status: CoverageStatus) -> StatusIcon {
    match status {
        CoverageStatus::Covered => StatusIcon::CheckCircle,
        CoverageStatus::NotCovered => StatusIcon::XCircle,
        CoverageStatus::Conditional | CoverageStatus::Unclear => StatusIcon::AlertTriangle,
    }
}

pub fn status_style_class(status: CoverageStatus) -> StatusStyle {
    match status {
        CoverageStatus::Covered => StatusStyle::Success,
        CoverageStatus::NotCovered => StatusStyle::Destructive,
        CoverageStatus::Conditional => StatusStyle::Warning,
        CoverageStatus::Unclear => StatusStyle::Neutral,
    }
}

/// 分数 [0, 1] 转百分比，四舍五入并限制在 0..=100
fn to_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// 置信度百分比
pub fn confidence_percent(result: &AnalysisResult) -> u8 {
    to_percent(result.confidence)
}

/// 证据匹配度百分比
pub fn match_percent(evidence: &Evidence) -> u8 {
    to_percent(evidence.similarity_score)
}

/// 证据按收到的顺序展示（服务端已按相似度排序）
pub fn ordered_evidence(result: &AnalysisResult) -> &[Evidence] {
    &result.evidence
}

/// 需要展示的条件；空列表表示没有附加条件，返回 `None`
pub fn visible_conditions(result: &AnalysisResult) -> Option<&[String]> {
    if result.conditions.is_empty() {
        None
    } else {
        Some(&result.conditions)
    }
}

/// 系统状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// 等待上传文档
    Waiting,
    /// 可以提问
    Ready,
    /// 有操作进行中
    Processing,
}

impl SystemStatus {
    pub fn label(self) -> &'static str {
        match self {
            SystemStatus::Waiting => "waiting",
            SystemStatus::Ready => "ready",
            SystemStatus::Processing => "processing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SystemStatus::Waiting => "请先上传文档再开始分析",
            SystemStatus::Ready => "已就绪，可以提问",
            SystemStatus::Processing => "正在处理中...",
        }
    }
}

pub fn system_status(state: &SessionState) -> SystemStatus {
    if state.in_flight {
        SystemStatus::Processing
    } else if state.document.is_some() {
        SystemStatus::Ready
    } else {
        SystemStatus::Waiting
    }
}

/// 秒数保留两位小数
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}
