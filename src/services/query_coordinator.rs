//! 提问协调器 - 业务能力层
//!
//! 只负责"对已挂载的文档提一个问题并记录结果"

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::clients::AnalysisClient;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::AnalysisResult;
use crate::session::SessionStore;
use crate::utils::logging::truncate_text;

/// 提问协调器
///
/// 职责：
/// - 没有文档时立即失败，不发任何请求
/// - 单飞：会话已有操作进行中时直接拒绝
/// - 测量往返耗时并写入结果
/// - 成功才整体替换最近结果、累计 token；失败时保留上一次结果
pub struct QueryCoordinator {
    client: Arc<AnalysisClient>,
    session: Arc<SessionStore>,
}

impl QueryCoordinator {
    pub fn new(client: Arc<AnalysisClient>, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// 提交问题
    ///
    /// # 参数
    /// - `question_text`: 用户输入的问题
    ///
    /// # 返回
    /// 返回分析结果，其中 `processing_time_seconds` 为客户端测得的往返耗时
    pub async fn submit(&self, question_text: &str) -> AppResult<AnalysisResult> {
        if !self.session.has_document() {
            return Err(AppError::NoDocument);
        }
        let question = question_text.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let _guard = self.session.begin("query")?;
        info!("🔍 正在分析: {}", truncate_text(question, 80));

        let started = Instant::now();
        let mut result = self.client.ask(question).await.map_err(|e| {
            warn!("⚠️ 分析失败: {}", e);
            e
        })?;
        let elapsed = started.elapsed().as_secs_f64();

        if let Some(reported) = result.processing_time_seconds {
            debug!("服务端耗时 {:.3}s，客户端往返 {:.3}s", reported, elapsed);
        }
        result.processing_time_seconds = Some(elapsed);

        self.session.record_result(result.clone(), elapsed);
        info!("✓ 分析完成，耗时 {:.2} 秒", elapsed);

        Ok(result)
    }
}
