pub mod document_source;
pub mod query_coordinator;
pub mod result_interpreter;
pub mod upload_coordinator;

pub use document_source::{resolve_file, resolve_url, SelectedFile};
pub use query_coordinator::QueryCoordinator;
pub use upload_coordinator::UploadCoordinator;
