//! HTTP 传输 - 基础设施层
//!
//! 持有唯一的 reqwest::Client，只暴露"发请求、拿回状态码和字节"的能力

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;

/// 原始 HTTP 响应
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 反序列化响应体
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// 响应体文本（非 UTF-8 字节会被替换）
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP 传输
///
/// 职责：
/// - 持有唯一的 Client（连接池、超时配置）
/// - 暴露 GET / JSON POST / multipart POST 能力
/// - 不认识文档 / 会话 / 分析结果
/// - 非 2xx 不算错误，由调用方按状态码分支
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// 按配置创建传输层
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("无法创建 HTTP 客户端")?;
        Ok(Self { client })
    }

    /// GET 请求
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} 失败", url))?;
        Self::collect(response).await
    }

    /// JSON POST 请求
    pub async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<HttpResponse> {
        debug!("POST {} (json)", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} 失败", url))?;
        Self::collect(response).await
    }

    /// multipart 文件上传
    ///
    /// # 参数
    /// - `url`: 上传地址
    /// - `field`: 表单字段名
    /// - `file_name`: 文件名
    /// - `media_type`: 文件的媒体类型
    /// - `data`: 文件字节
    pub async fn post_file(
        &self,
        url: &str,
        field: &str,
        file_name: &str,
        media_type: &str,
        data: Vec<u8>,
    ) -> Result<HttpResponse> {
        debug!(
            "POST {} (multipart) | 文件: {} | {} 字节 | {}",
            url,
            file_name,
            data.len(),
            media_type
        );
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(media_type)
            .with_context(|| format!("无效的媒体类型: {}", media_type))?;
        let form = Form::new().part(field.to_string(), part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("POST {} 失败", url))?;
        Self::collect(response).await
    }

    async fn collect(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .context("读取响应体失败")?
            .to_vec();
        debug!("响应 {} | {} 字节", status, body.len());
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_non_success_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let response = transport()
            .get(&format!("{}/missing", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(!response.is_success());
        assert_eq!(response.text_lossy(), "nope");
    }

    #[tokio::test]
    async fn test_post_file_sends_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport()
            .post_file(
                &format!("{}/upload/", server.uri()),
                "file",
                "policy.pdf",
                "application/pdf",
                b"%PDF-1.7".to_vec(),
            )
            .await
            .unwrap();
        assert!(response.is_success());

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("filename=\"policy.pdf\""));
        assert!(body.contains("%PDF-1.7"));
    }
}

