//! 分析服务 API 客户端
//!
//! 封装所有与远程分析服务相关的调用逻辑（上传 / 提问 / 状态 / 健康检查）

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, QueryError, UploadError};
use crate::infrastructure::{HttpResponse, HttpTransport};
use crate::models::{AnalysisResult, HealthReport, QueryRequest, ServiceStatus, UploadReceipt};

/// 上传接口中文件所在的表单字段
const UPLOAD_FIELD: &str = "file";

/// 从源 URL 拉回来的文档
#[derive(Debug, Clone)]
pub struct FetchedSource {
    pub data: Vec<u8>,
    /// 源站声明的媒体类型（去掉参数）
    pub media_type: Option<String>,
}

/// 分析服务客户端
pub struct AnalysisClient {
    base_url: String,
    transport: HttpTransport,
}

impl AnalysisClient {
    /// 创建新的分析服务客户端
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(&config.api_base_url, transport))
    }

    /// 使用已有的传输层创建
    pub fn with_transport(base_url: &str, transport: HttpTransport) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接接口地址，例如 `upload/` → `{base}/upload/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 服务根地址（去掉 `/api/v1` 前缀），健康检查挂在这里
    pub fn service_root(&self) -> &str {
        self.base_url
            .strip_suffix("/api/v1")
            .unwrap_or(&self.base_url)
    }

    /// 从源 URL 拉取文档字节
    pub async fn fetch_source(&self, url: &str) -> AppResult<FetchedSource> {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| UploadError::SourceFetch {
                url: url.to_string(),
                reason: format!("{:#}", e),
            })?;

        if !response.is_success() {
            return Err(UploadError::SourceFetch {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status.as_u16()),
            }
            .into());
        }

        let media_type = response
            .content_type
            .as_deref()
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty());

        debug!(
            "源文档拉取完成: {} | {} 字节 | {:?}",
            url,
            response.body.len(),
            media_type
        );

        Ok(FetchedSource {
            data: response.body,
            media_type,
        })
    }

    /// 上传文档
    ///
    /// # 参数
    /// - `file_name`: 文件名（服务端据此判断类型）
    /// - `media_type`: 媒体类型
    /// - `data`: 文件字节
    ///
    /// # 返回
    /// 返回上传回执；回执无法解析时返回空回执，只要状态码成功即视为上传成功
    pub async fn upload_document(
        &self,
        file_name: &str,
        media_type: &str,
        data: Vec<u8>,
    ) -> AppResult<UploadReceipt> {
        let url = self.endpoint("upload/");
        let response = self
            .transport
            .post_file(&url, UPLOAD_FIELD, file_name, media_type, data)
            .await
            .map_err(|e| AppError::upload_transport(&url, e))?;

        if !response.is_success() {
            warn!(
                "上传被拒绝: HTTP {} | {:?}",
                response.status.as_u16(),
                Self::extract_detail(&response)
            );
            return Err(AppError::upload_rejected(response.status.as_u16()));
        }

        let receipt = response.json::<UploadReceipt>().unwrap_or_default();
        debug!("上传回执: {:?}", receipt);
        Ok(receipt)
    }

    /// 提问
    ///
    /// # 参数
    /// - `question`: 已去除首尾空白的问题
    ///
    /// # 返回
    /// 返回服务端给出的分析结果（未经客户端改写）
    pub async fn ask(&self, question: &str) -> AppResult<AnalysisResult> {
        let url = self.endpoint("ask/");
        let response = self
            .transport
            .post_json(&url, &QueryRequest { question })
            .await
            .map_err(|e| AppError::query_transport(&url, e))?;

        if !response.is_success() {
            let detail = Self::extract_detail(&response);
            warn!(
                "分析请求被拒绝: HTTP {} | {:?}",
                response.status.as_u16(),
                detail
            );
            return Err(QueryError::Rejected {
                status: response.status.as_u16(),
                detail,
            }
            .into());
        }

        let result = response.json::<AnalysisResult>().map_err(QueryError::from)?;
        Ok(result)
    }

    /// 查询服务端文档加载状态
    pub async fn service_status(&self) -> Result<ServiceStatus> {
        let url = self.endpoint("status/");
        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            anyhow::bail!("状态接口返回 HTTP {}", response.status.as_u16());
        }
        response
            .json::<ServiceStatus>()
            .context("无法解析状态接口响应")
    }

    /// 健康检查
    pub async fn health(&self) -> Result<HealthReport> {
        let url = format!("{}/health", self.service_root());
        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            anyhow::bail!("健康检查返回 HTTP {}", response.status.as_u16());
        }
        response
            .json::<HealthReport>()
            .context("无法解析健康检查响应")
    }

    /// 提取错误响应中的 `detail` 字段，没有则返回截断后的原文
    pub fn extract_detail(response: &HttpResponse) -> Option<String> {
        if response.body.is_empty() {
            return None;
        }
        match response.json::<Value>() {
            Ok(body) => body
                .get("detail")
                .map(|d| d.as_str().map(str::to_string).unwrap_or_else(|| d.to_string())),
            Err(_) => Some(crate::utils::logging::truncate_text(&response.text_lossy(), 200)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn client(base: &str) -> AnalysisClient {
        let config = Config::for_base_url(base);
        AnalysisClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = client("http://127.0.0.1:8000/api/v1/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api/v1");
        assert_eq!(client.endpoint("upload/"), "http://127.0.0.1:8000/api/v1/upload/");
        assert_eq!(client.endpoint("/ask/"), "http://127.0.0.1:8000/api/v1/ask/");
    }

    #[test]
    fn test_service_root_strips_api_prefix() {
        assert_eq!(
            client("http://127.0.0.1:8000/api/v1").service_root(),
            "http://127.0.0.1:8000"
        );
        assert_eq!(
            client("http://scanner.local").service_root(),
            "http://scanner.local"
        );
    }

    #[test]
    fn test_extract_detail() {
        let json_body = HttpResponse {
            status: StatusCode::BAD_REQUEST,
            content_type: Some("application/json".to_string()),
            body: br#"{"detail": "No document uploaded."}"#.to_vec(),
        };
        assert_eq!(
            AnalysisClient::extract_detail(&json_body).as_deref(),
            Some("No document uploaded.")
        );

        let text_body = HttpResponse {
            status: StatusCode::BAD_GATEWAY,
            content_type: None,
            body: b"upstream down".to_vec(),
        };
        assert_eq!(
            AnalysisClient::extract_detail(&text_body).as_deref(),
            Some("upstream down")
        );

        let empty = HttpResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            content_type: None,
            body: Vec::new(),
        };
        assert!(AnalysisClient::extract_detail(&empty).is_none());
    }
}
