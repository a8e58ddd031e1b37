use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::students::requests::{CreateStudentRequest, StudentListParams};
use crate::services::StudentService;
use crate::utils::SafeCode;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(&req, body.into_inner()).await
}

pub async fn get_student(req: HttpRequest, path: SafeCode) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, &path.0).await
}

pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(web::resource("/{code}").route(web::get().to(get_student))),
    );
}
