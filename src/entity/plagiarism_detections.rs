//! 查重结果实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plagiarism_detections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    #[sea_orm(column_name = "submission_id_1")]
    pub submission_id_1: i64,
    #[sea_orm(column_name = "submission_id_2")]
    pub submission_id_2: i64,
    pub similarity_score: f64,
    pub semantic_similarity: Option<f64>,
    pub structural_similarity: Option<f64>,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub detected_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_detection(self) -> crate::models::plagiarism::entities::PlagiarismDetection {
        use crate::models::plagiarism::entities::{PlagiarismDetection, PlagiarismStatus};
        use chrono::{DateTime, Utc};

        PlagiarismDetection {
            id: self.id,
            assignment_id: self.assignment_id,
            submission_id_1: self.submission_id_1,
            submission_id_2: self.submission_id_2,
            similarity_score: self.similarity_score,
            semantic_similarity: self.semantic_similarity,
            structural_similarity: self.structural_similarity,
            status: self.status.parse().unwrap_or(PlagiarismStatus::ReviewNeeded),
            reviewed_by: self.reviewed_by,
            detected_at: DateTime::<Utc>::from_timestamp(self.detected_at, 0).unwrap_or_default(),
        }
    }
}
