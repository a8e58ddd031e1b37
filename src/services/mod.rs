pub mod assignments;
pub mod feedback;
pub mod grades;
pub mod instructors;
pub mod plagiarism;
pub mod sections;
pub mod students;
pub mod submissions;
pub mod system;

pub use assignments::AssignmentService;
pub use feedback::FeedbackService;
pub use grades::GradeService;
pub use instructors::InstructorService;
pub use plagiarism::PlagiarismService;
pub use sections::SectionService;
pub use students::StudentService;
pub use submissions::SubmissionService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 取共享实例
pub(crate) fn shared<T: Clone + 'static>(request: &HttpRequest) -> T {
    request
        .app_data::<web::Data<T>>()
        .unwrap_or_else(|| panic!("{} not found in app data", std::any::type_name::<T>()))
        .get_ref()
        .clone()
}

pub(crate) fn storage_from(request: &HttpRequest) -> Arc<dyn Storage> {
    shared::<Arc<dyn Storage>>(request)
}

/// 存储层等内部错误统一返回 500
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}
