use serde::{Deserialize, Serialize};
use std::fmt;

/// 覆盖状态
///
/// 服务端返回的粗粒度结论。无法识别的取值一律反序列化为 `Unclear`，
/// 结果总是可以渲染。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum CoverageStatus {
    /// 覆盖
    Covered,
    /// 不覆盖
    NotCovered,
    /// 有条件覆盖
    Conditional,
    /// 不明确
    Unclear,
}

impl CoverageStatus {
    /// 线上（JSON）取值
    pub fn as_str(self) -> &'static str {
        match self {
            CoverageStatus::Covered => "covered",
            CoverageStatus::NotCovered => "not_covered",
            CoverageStatus::Conditional => "conditional",
            CoverageStatus::Unclear => "unclear",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "covered" => CoverageStatus::Covered,
            "not_covered" => CoverageStatus::NotCovered,
            "conditional" => CoverageStatus::Conditional,
            _ => CoverageStatus::Unclear,
        }
    }
}

impl From<String> for CoverageStatus {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 证据条款
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub clause_id: String,
    pub text: String,
    /// 相似度 [0, 1]
    pub similarity_score: f64,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// 分析结果
///
/// 每次成功的提问产生一个，整体替换上一个，从不与旧结果合并
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub query: String,
    pub answer: String,
    /// 按服务端排序（相似度从高到低）给出，客户端不重排
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub conditions: Vec<String>,
    pub decision_rationale: String,
    /// 置信度 [0, 1]
    pub confidence: f64,
    pub status: CoverageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<u64>,
    /// 处理耗时（秒）；成功返回后由客户端测得的往返时间覆盖
    #[serde(
        default,
        rename = "processing_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_time_seconds: Option<f64>,
}

/// 提问请求体
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}
