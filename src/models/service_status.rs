use serde::Deserialize;

/// 服务端 `/status/` 接口返回的文档加载状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub documents_loaded: bool,
    pub chunks_count: u64,
    pub index_built: bool,
    pub services_available: bool,
}

/// 服务端 `/health` 接口返回的健康检查结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
