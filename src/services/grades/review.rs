use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found};
use crate::models::grades::requests::ReviewGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::validate::validate_criterion_score;

/// 第一个越界的分数
fn invalid_score(req: &ReviewGradeRequest) -> Option<String> {
    req.provided_scores()
        .into_iter()
        .find_map(|(name, score)| {
            validate_criterion_score(score)
                .err()
                .map(|msg| format!("{name}: {msg}"))
        })
}

pub async fn review_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
    req: ReviewGradeRequest,
) -> ActixResult<HttpResponse> {
    if let Some(msg) = invalid_score(&req) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidScore, msg)));
    }

    let storage = service.get_storage(request);

    if let Some(instructor_id) = req.reviewed_by {
        match storage.get_instructor_by_id(instructor_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::InstructorNotFound,
                    "复核教师不存在",
                )));
            }
            Err(e) => return Ok(internal_error("查询教师失败", e)),
        }
    }

    match storage.review_grade(grade_id, req).await {
        Ok(Some(grade)) => {
            tracing::info!("Grade {} reviewed", grade.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "复核成功")))
        }
        Ok(None) => Ok(grade_not_found()),
        Err(e) => Ok(internal_error("复核评分失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_score_detection() {
        let ok = ReviewGradeRequest {
            final_design_score: Some(4.5),
            ..Default::default()
        };
        assert!(invalid_score(&ok).is_none());

        let bad = ReviewGradeRequest {
            final_comprehension_score: Some(3.0),
            final_functionality_score: Some(7.0),
            ..Default::default()
        };
        let msg = invalid_score(&bad).unwrap();
        assert!(msg.starts_with("final_functionality_score"));
    }
}
