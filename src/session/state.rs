//! 会话状态 - 唯一事实来源
//!
//! 持有当前文档、进行中标记、最近一次结果、累计 token 与最近一次延迟。
//! 只有上传 / 提问两个协调器能写（crate 内可见的写接口），任何人都可以读快照。

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResult, AttachedDocument};

/// 会话状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub document: Option<AttachedDocument>,
    pub in_flight: bool,
    pub last_result: Option<AnalysisResult>,
    pub cumulative_tokens: u64,
    pub last_latency_seconds: Option<f64>,
}

impl SessionState {
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }
}

/// 会话状态存储
///
/// 锁从不跨越 `.await` 持有；读取方拿到的是克隆出来的快照，
/// 因此永远看不到写了一半的结果。
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态的快照
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    pub fn has_document(&self) -> bool {
        self.lock().document.is_some()
    }

    /// 占用会话（单飞）
    ///
    /// 已有操作进行中时立即拒绝，不排队。返回的守卫在 drop 时清除进行中标记，
    /// 成功 / 失败 / 提前返回都会走到这里。
    pub(crate) fn begin(&self, operation: &'static str) -> AppResult<InFlightGuard<'_>> {
        let mut state = self.lock();
        if state.in_flight {
            debug!("会话忙，拒绝 {}", operation);
            return Err(AppError::busy(operation));
        }
        state.in_flight = true;
        debug!("会话进入进行中: {}", operation);
        Ok(InFlightGuard {
            store: self,
            operation,
        })
    }

    /// 挂载新文档，同时作废上一份文档的结果
    pub(crate) fn attach_document(&self, document: AttachedDocument) {
        let mut state = self.lock();
        state.document = Some(document);
        state.last_result = None;
    }

    /// 整体替换最近一次结果并累计 token
    pub(crate) fn record_result(&self, result: AnalysisResult, latency_seconds: f64) {
        let mut state = self.lock();
        state.cumulative_tokens += result.token_usage.unwrap_or(0);
        state.last_latency_seconds = Some(latency_seconds);
        state.last_result = Some(result);
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // 写入都是单条赋值，中毒后的数据依然一致
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 进行中守卫
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    store: &'a SessionStore,
    operation: &'static str,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.store.lock().in_flight = false;
        debug!("会话空闲: {} 结束", self.operation);
    }
}
