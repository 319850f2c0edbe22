use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF 的媒体类型
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
/// Word 文档（DOCX）的媒体类型
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 文档来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    /// 远程 URL
    Url,
    /// 本地文件
    File,
}

impl fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentOrigin::Url => write!(f, "url"),
            DocumentOrigin::File => write!(f, "file"),
        }
    }
}

/// 文档定位符：源 URL 或内存中的文件字节
#[derive(Clone, PartialEq, Eq)]
pub enum DocumentLocator {
    Url(String),
    Bytes { data: Vec<u8>, media_type: String },
}

impl fmt::Debug for DocumentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentLocator::Url(url) => f.debug_tuple("Url").field(url).finish(),
            DocumentLocator::Bytes { data, media_type } => f
                .debug_struct("Bytes")
                .field("len", &data.len())
                .field("media_type", media_type)
                .finish(),
        }
    }
}

/// 待上传的文档
///
/// 用户提供输入的那一刻创建，由上传协调器按值消费一次，之后不再保留。
/// 来源由定位符的种类决定，两者不会出现不一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDocument {
    pub locator: DocumentLocator,
    pub display_name: String,
}

impl PendingDocument {
    pub fn origin(&self) -> DocumentOrigin {
        match self.locator {
            DocumentLocator::Url(_) => DocumentOrigin::Url,
            DocumentLocator::Bytes { .. } => DocumentOrigin::File,
        }
    }
}

/// 已挂载到会话的文档
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedDocument {
    pub display_name: String,
    pub origin: DocumentOrigin,
    /// 上传成功的时间
    pub attached_at: DateTime<Local>,
    /// 服务端报告的切块数量（如果响应里有）
    pub chunks_processed: Option<u64>,
}

/// 上传接口的回执
///
/// 核心逻辑只看状态码，回执内容仅用于日志，解析失败时忽略
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chunks_processed: Option<u64>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_follows_locator() {
        let url_doc = PendingDocument {
            locator: DocumentLocator::Url("https://host/a.pdf".to_string()),
            display_name: "a.pdf".to_string(),
        };
        assert_eq!(url_doc.origin(), DocumentOrigin::Url);

        let file_doc = PendingDocument {
            locator: DocumentLocator::Bytes {
                data: vec![1, 2, 3],
                media_type: PDF_MEDIA_TYPE.to_string(),
            },
            display_name: "a.pdf".to_string(),
        };
        assert_eq!(file_doc.origin(), DocumentOrigin::File);
    }

    #[test]
    fn test_bytes_debug_hides_content() {
        let locator = DocumentLocator::Bytes {
            data: vec![0u8; 4096],
            media_type: PDF_MEDIA_TYPE.to_string(),
        };
        let rendered = format!("{:?}", locator);
        assert!(rendered.contains("len: 4096"));
        assert!(rendered.len() < 200);
    }

    #[test]
    fn test_receipt_tolerates_missing_fields() {
        let receipt: UploadReceipt = serde_json::from_str(r#"{"chunks_processed": 12}"#).unwrap();
        assert_eq!(receipt.chunks_processed, Some(12));
        assert!(receipt.message.is_none());
    }
}
