//! 评分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub student_id: Option<String>,
    pub ai_comprehension_score: Option<f64>,
    pub ai_design_score: Option<f64>,
    pub ai_implementation_score: Option<f64>,
    pub ai_functionality_score: Option<f64>,
    pub ai_total_score: Option<f64>,
    pub final_comprehension_score: Option<f64>,
    pub final_design_score: Option<f64>,
    pub final_implementation_score: Option<f64>,
    pub final_functionality_score: Option<f64>,
    pub final_total_score: Option<f64>,
    pub participation_percentage: Option<f64>,
    pub adjusted_final_score: Option<f64>,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructor_notes: Option<String>,
    pub created_at: i64,
    pub published_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::models::grades::entities::{Grade, GradeStatus};
        use chrono::{DateTime, Utc};

        Grade {
            id: self.id,
            submission_id: self.submission_id,
            student_id: self.student_id,
            ai_comprehension_score: self.ai_comprehension_score,
            ai_design_score: self.ai_design_score,
            ai_implementation_score: self.ai_implementation_score,
            ai_functionality_score: self.ai_functionality_score,
            ai_total_score: self.ai_total_score,
            final_comprehension_score: self.final_comprehension_score,
            final_design_score: self.final_design_score,
            final_implementation_score: self.final_implementation_score,
            final_functionality_score: self.final_functionality_score,
            final_total_score: self.final_total_score,
            participation_percentage: self.participation_percentage,
            adjusted_final_score: self.adjusted_final_score,
            status: self.status.parse().unwrap_or(GradeStatus::AutoGraded),
            reviewed_by: self.reviewed_by,
            reviewed_at: self
                .reviewed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            instructor_notes: self.instructor_notes,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            published_at: self
                .published_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
