pub mod assignments;
pub mod feedback;
pub mod frontend;
pub mod grades;
pub mod instructors;
pub mod plagiarism;
pub mod sections;
pub mod students;
pub mod submissions;
pub mod system;

pub use assignments::configure_assignments_routes;
pub use feedback::configure_feedback_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grades_routes;
pub use instructors::configure_instructors_routes;
pub use plagiarism::configure_plagiarism_routes;
pub use sections::configure_sections_routes;
pub use students::configure_students_routes;
pub use submissions::configure_submissions_routes;
pub use system::configure_system_routes;

use actix_web::web;

/// 注册全部 API 路由，前端兜底路由需最后注册
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_instructors_routes)
        .configure(configure_sections_routes)
        .configure(configure_students_routes)
        .configure(configure_assignments_routes)
        .configure(configure_submissions_routes)
        .configure(configure_grades_routes)
        .configure(configure_feedback_routes)
        .configure(configure_plagiarism_routes)
        .configure(configure_system_routes);
}
