//! 上传协调器 - 业务能力层
//!
//! 只负责"把一份待上传文档送到服务端并挂到会话上"

use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::AnalysisClient;
use crate::error::AppResult;
use crate::models::{AttachedDocument, DocumentLocator, PendingDocument};
use crate::services::document_source::media_type_for_name;
use crate::session::SessionStore;

/// 上传协调器
///
/// 职责：
/// - 单飞：会话已有操作进行中时直接拒绝
/// - 把定位符变成字节（URL 先拉取，文件直接使用）
/// - 上传成功才替换会话文档并清空旧结果
/// - 失败时会话文档保持不变
pub struct UploadCoordinator {
    client: Arc<AnalysisClient>,
    session: Arc<SessionStore>,
}

impl UploadCoordinator {
    pub fn new(client: Arc<AnalysisClient>, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// 挂载文档
    ///
    /// # 参数
    /// - `pending`: 待上传文档，按值消费
    ///
    /// # 返回
    /// 返回挂载后的文档
    pub async fn attach(&self, pending: PendingDocument) -> AppResult<AttachedDocument> {
        let _guard = self.session.begin("upload")?;

        let origin = pending.origin();
        let display_name = pending.display_name;
        info!("📤 正在上传文档: {} ({})", display_name, origin);

        let (data, media_type) = match pending.locator {
            DocumentLocator::Url(url) => {
                let fetched = self.client.fetch_source(&url).await.map_err(|e| {
                    warn!("⚠️ 源文档拉取失败: {}", e);
                    e
                })?;
                let media_type = fetched
                    .media_type
                    .unwrap_or_else(|| media_type_for_name(&display_name).to_string());
                (fetched.data, media_type)
            }
            DocumentLocator::Bytes { data, media_type } => (data, media_type),
        };

        let receipt = self
            .client
            .upload_document(&display_name, &media_type, data)
            .await
            .map_err(|e| {
                warn!("⚠️ 文档上传失败: {}", e);
                e
            })?;

        let document = AttachedDocument {
            display_name,
            origin,
            attached_at: Local::now(),
            chunks_processed: receipt.chunks_processed,
        };
        self.session.attach_document(document.clone());

        match receipt.chunks_processed {
            Some(chunks) => info!(
                "✓ 文档已挂载: {} (切块 {} 个)",
                document.display_name, chunks
            ),
            None => info!("✓ 文档已挂载: {}", document.display_name),
        }

        Ok(document)
    }
}
