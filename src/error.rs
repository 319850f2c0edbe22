use thiserror::Error;

/// 应用程序错误类型
///
/// 所有协调器（上传 / 提问）都通过 `AppResult<T>` 向调用方返回类型化的失败，
/// 预期内的失败（非 2xx 响应、输入校验失败）不会以 panic 的形式出现。
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地输入校验错误
    #[error("输入校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 尚未挂载文档就发起了提问
    #[error("尚未挂载文档，请先上传文档")]
    NoDocument,
    /// 会话中已有正在进行的操作
    #[error("会话忙: 已有操作正在进行，本次 {operation} 被拒绝")]
    SessionBusy { operation: &'static str },
    /// 文档上传错误
    #[error("上传错误: {0}")]
    Upload(#[from] UploadError),
    /// 分析请求错误
    #[error("分析错误: {0}")]
    Query(#[from] QueryError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 本地输入校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// URL 为空
    #[error("empty URL")]
    EmptyUrl,
    /// 文件类型不受支持（只接受 PDF / DOCX）
    #[error("unsupported file type: {media_type}")]
    UnsupportedFileType { media_type: String },
    /// 问题为空
    #[error("empty question")]
    EmptyQuestion,
}

/// 文档上传错误
#[derive(Debug, Error)]
pub enum UploadError {
    /// 从源 URL 拉取文档失败
    #[error("无法从 {url} 获取文档: {reason}")]
    SourceFetch { url: String, reason: String },
    /// 服务端拒绝了上传
    #[error("服务端拒绝上传 (HTTP {status})")]
    Rejected { status: u16 },
    /// 网络层失败
    #[error("上传请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },
}

/// 分析请求错误
#[derive(Debug, Error)]
pub enum QueryError {
    /// 服务端返回非成功状态
    #[error("服务端拒绝分析请求 (HTTP {status}): {detail:?}")]
    Rejected { status: u16, detail: Option<String> },
    /// 网络层失败
    #[error("分析请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },
    /// 响应体无法解析为分析结果
    #[error("分析结果解析失败: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {key} 不合法: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建会话忙错误
    pub fn busy(operation: &'static str) -> Self {
        AppError::SessionBusy { operation }
    }

    /// 创建上传被拒绝错误
    pub fn upload_rejected(status: u16) -> Self {
        AppError::Upload(UploadError::Rejected { status })
    }

    /// 创建上传网络错误
    pub fn upload_transport(endpoint: impl Into<String>, source: anyhow::Error) -> Self {
        AppError::Upload(UploadError::Transport {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建分析网络错误
    pub fn query_transport(endpoint: impl Into<String>, source: anyhow::Error) -> Self {
        AppError::Query(QueryError::Transport {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 失败是否来自本地输入（不需要重试网络）
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NoDocument)
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
