pub mod analysis;
pub mod document;
pub mod service_status;

pub use analysis::{AnalysisResult, CoverageStatus, Evidence, QueryRequest};
pub use document::{
    AttachedDocument, DocumentLocator, DocumentOrigin, PendingDocument, UploadReceipt,
    DOCX_MEDIA_TYPE, PDF_MEDIA_TYPE,
};
pub use service_status::{HealthReport, ServiceStatus};
