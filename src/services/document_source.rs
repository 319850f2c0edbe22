//! 文档来源解析 - 业务能力层
//!
//! 把用户给出的 URL 或本地文件统一成一个 `PendingDocument`。
//! 解析本身只做校验和规整，不做任何网络 / 磁盘 I/O。

use anyhow::{Context, Result};
use phf::phf_map;
use std::path::Path;

use crate::error::{AppResult, ValidationError};
use crate::models::{DocumentLocator, PendingDocument, DOCX_MEDIA_TYPE, PDF_MEDIA_TYPE};

/// URL 没有路径段时使用的展示名
pub const FALLBACK_DISPLAY_NAME: &str = "Document";

/// 未知文件类型
pub const OCTET_STREAM: &str = "application/octet-stream";

/// 按扩展名（小写）推断媒体类型
static EXTENSION_MEDIA_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "pdf" => PDF_MEDIA_TYPE,
    "docx" => DOCX_MEDIA_TYPE,
};

/// 用户选中的本地文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// 从磁盘读取文件，按扩展名推断媒体类型
    ///
    /// 相当于文件选择器：只负责把文件变成字节，类型是否可接受由 `resolve_file` 判断
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("无法读取文件: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("路径没有文件名: {}", path.display()))?;
        let media_type = media_type_for_name(&name).to_string();
        Ok(Self {
            name,
            media_type,
            data,
        })
    }
}

/// 是否是可接受的文档媒体类型（PDF / DOCX）
pub fn is_supported_media_type(media_type: &str) -> bool {
    let normalized = media_type.trim().to_ascii_lowercase();
    EXTENSION_MEDIA_TYPES
        .values()
        .any(|accepted| *accepted == normalized)
}

/// 按文件名扩展名推断媒体类型，未知扩展名返回 `application/octet-stream`
pub fn media_type_for_name(name: &str) -> &'static str {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| EXTENSION_MEDIA_TYPES.get(ext.to_ascii_lowercase().as_str()))
        .copied()
        .unwrap_or(OCTET_STREAM)
}

/// URL 最后一个 `/` 之后的片段；片段为空时返回 "Document"
pub fn display_name_from_url(url: &str) -> String {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => FALLBACK_DISPLAY_NAME.to_string(),
    }
}

/// 解析 URL 输入
///
/// # 参数
/// - `input`: 用户输入的 URL（会去除首尾空白）
///
/// # 返回
/// 返回待上传文档；空输入返回 `ValidationError::EmptyUrl`
pub fn resolve_url(input: &str) -> AppResult<PendingDocument> {
    let url = input.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl.into());
    }
    Ok(PendingDocument {
        locator: DocumentLocator::Url(url.to_string()),
        display_name: display_name_from_url(url),
    })
}

/// 解析本地文件输入
///
/// # 参数
/// - `file`: 选中的文件（字节随文档一起移交）
///
/// # 返回
/// 返回待上传文档；非 PDF / DOCX 返回 `ValidationError::UnsupportedFileType`
pub fn resolve_file(file: SelectedFile) -> AppResult<PendingDocument> {
    if !is_supported_media_type(&file.media_type) {
        return Err(ValidationError::UnsupportedFileType {
            media_type: file.media_type,
        }
        .into());
    }
    Ok(PendingDocument {
        locator: DocumentLocator::Bytes {
            data: file.data,
            media_type: file.media_type.trim().to_ascii_lowercase(),
        },
        display_name: file.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::DocumentOrigin;
    use std::io::Write;

    #[test]
    fn test_display_name_is_last_segment() {
        let doc = resolve_url("https://host/docs/policy.pdf").unwrap();
        assert_eq!(doc.display_name, "policy.pdf");
        assert_eq!(doc.origin(), DocumentOrigin::Url);

        assert_eq!(display_name_from_url("https://host/a/b/c"), "c");
        assert_eq!(display_name_from_url("policy.docx"), "policy.docx");
    }

    #[test]
    fn test_display_name_falls_back_without_segment() {
        let doc = resolve_url("https://host/").unwrap();
        assert_eq!(doc.display_name, "Document");
        assert_eq!(display_name_from_url("https://host/docs/"), "Document");
    }

    #[test]
    fn test_url_is_trimmed() {
        let doc = resolve_url("  https://host/docs/policy.pdf \n").unwrap();
        assert_eq!(
            doc.locator,
            DocumentLocator::Url("https://host/docs/policy.pdf".to_string())
        );
    }

    #[test]
    fn test_empty_url_rejected() {
        for input in ["", "   ", "\t\n"] {
            let err = resolve_url(input).unwrap_err();
            assert!(matches!(
                err,
                AppError::Validation(ValidationError::EmptyUrl)
            ));
        }
    }

    #[test]
    fn test_accepted_file_types() {
        for media_type in [PDF_MEDIA_TYPE, DOCX_MEDIA_TYPE] {
            let file = SelectedFile::new("claims.bin", media_type, vec![1, 2]);
            let doc = resolve_file(file).unwrap();
            assert_eq!(doc.display_name, "claims.bin");
            assert_eq!(doc.origin(), DocumentOrigin::File);
        }
    }

    #[test]
    fn test_rejected_file_types() {
        for media_type in [
            "image/png",
            "text/plain",
            "application/msword",
            OCTET_STREAM,
            "",
        ] {
            let file = SelectedFile::new("policy.pdf", media_type, Vec::new());
            let err = resolve_file(file).unwrap_err();
            assert!(
                matches!(
                    err,
                    AppError::Validation(ValidationError::UnsupportedFileType { .. })
                ),
                "{} should be rejected",
                media_type
            );
        }
    }

    #[test]
    fn test_media_type_for_name() {
        assert_eq!(media_type_for_name("policy.PDF"), PDF_MEDIA_TYPE);
        assert_eq!(media_type_for_name("terms.docx"), DOCX_MEDIA_TYPE);
        assert_eq!(media_type_for_name("notes.txt"), OCTET_STREAM);
        assert_eq!(media_type_for_name("README"), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_load_infers_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();

        let selected = SelectedFile::load(&path).await.unwrap();
        assert_eq!(selected.name, "policy.pdf");
        assert_eq!(selected.media_type, PDF_MEDIA_TYPE);
        assert_eq!(selected.data, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = SelectedFile::load(Path::new("/no/such/policy.pdf")).await;
        assert!(result.is_err());
    }
}
