//! 分析会话 - 流程层
//!
//! 核心职责：把"文档来源解析 → 上传 → 提问 → 解读"串成一个可注入的会话对象
//!
//! 流程顺序：
//! 1. URL / 本地文件 → `PendingDocument`
//! 2. 上传协调器挂载文档（会话清空旧结果）
//! 3. 提问协调器提交问题（要求已有文档）
//! 4. 调用方读取快照并交给结果解读

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::clients::AnalysisClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{AnalysisResult, AttachedDocument, HealthReport, ServiceStatus};
use crate::services::{document_source, QueryCoordinator, SelectedFile, UploadCoordinator};
use crate::session::{SessionState, SessionStore};

/// 分析会话
///
/// - 持有会话状态（唯一事实来源）
/// - 组合上传 / 提问两个协调器，二者共享同一个会话状态，因此互斥
/// - 不渲染任何东西，只返回类型化的结果
pub struct AnalysisSession {
    client: Arc<AnalysisClient>,
    session: Arc<SessionStore>,
    uploader: UploadCoordinator,
    querier: QueryCoordinator,
}

impl AnalysisSession {
    /// 按配置创建新会话
    pub fn new(config: &Config) -> Result<Self> {
        let client = AnalysisClient::new(config)?;
        Ok(Self::with_parts(Arc::new(client), Arc::new(SessionStore::new())))
    }

    /// 注入客户端和会话状态
    pub fn with_parts(client: Arc<AnalysisClient>, session: Arc<SessionStore>) -> Self {
        Self {
            uploader: UploadCoordinator::new(client.clone(), session.clone()),
            querier: QueryCoordinator::new(client.clone(), session.clone()),
            client,
            session,
        }
    }

    /// 从 URL 挂载文档
    pub async fn attach_url(&self, url: &str) -> AppResult<AttachedDocument> {
        let pending = document_source::resolve_url(url)?;
        self.uploader.attach(pending).await
    }

    /// 挂载已选中的文件
    pub async fn attach_file(&self, file: SelectedFile) -> AppResult<AttachedDocument> {
        let pending = document_source::resolve_file(file)?;
        self.uploader.attach(pending).await
    }

    /// 从本地路径挂载文档
    pub async fn attach_path(&self, path: &Path) -> Result<AttachedDocument> {
        let file = SelectedFile::load(path).await?;
        Ok(self.attach_file(file).await?)
    }

    /// 提问
    pub async fn ask(&self, question: &str) -> AppResult<AnalysisResult> {
        self.querier.submit(question).await
    }

    /// 当前会话状态快照
    pub fn snapshot(&self) -> SessionState {
        self.session.snapshot()
    }

    /// 共享的会话状态（只读观察用）
    pub fn store(&self) -> Arc<SessionStore> {
        self.session.clone()
    }

    /// 服务端文档加载状态
    pub async fn service_status(&self) -> Result<ServiceStatus> {
        self.client.service_status().await
    }

    /// 服务端健康检查
    pub async fn health(&self) -> Result<HealthReport> {
        self.client.health().await
    }
}
