pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::entities::Rubric;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, assignment_id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, req).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}

/// 细则中每个维度的满分必须为正数
pub(crate) fn validate_rubric(rubric: &Rubric) -> Result<(), String> {
    if rubric.is_empty() {
        return Err("评分细则不能为空".to_string());
    }
    for (name, criterion) in rubric {
        if !criterion.max_score.is_finite() || criterion.max_score <= 0.0 {
            return Err(format!("维度 {name} 的满分必须大于 0"));
        }
    }
    Ok(())
}

pub(crate) fn validate_max_score(max_score: Option<f64>) -> Result<(), String> {
    match max_score {
        Some(score) if !score.is_finite() || score <= 0.0 => Err("作业满分必须大于 0".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::{RubricCriterion, default_rubric};

    #[test]
    fn test_validate_rubric() {
        assert!(validate_rubric(&default_rubric()).is_ok());
        assert!(validate_rubric(&Rubric::new()).is_err());

        let mut rubric = default_rubric();
        rubric.insert(
            "design".into(),
            RubricCriterion {
                max_score: 0.0,
                criteria: String::new(),
                weight: None,
            },
        );
        assert!(validate_rubric(&rubric).unwrap_err().contains("design"));
    }

    #[test]
    fn test_validate_max_score() {
        assert!(validate_max_score(None).is_ok());
        assert!(validate_max_score(Some(20.0)).is_ok());
        assert!(validate_max_score(Some(0.0)).is_err());
        assert!(validate_max_score(Some(f64::INFINITY)).is_err());
    }
}
