//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub section_id: String,
    pub group_number: i32,
    pub submitted_by: String,
    pub project_path: Option<String>,
    pub video_path: Option<String>,
    pub status: String,
    pub submitted_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::SubmittedBy",
        to = "super::students::Column::StudentId"
    )]
    Submitter,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submitter.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            section_id: self.section_id,
            group_number: self.group_number,
            submitted_by: self.submitted_by,
            project_path: self.project_path,
            video_path: self.video_path,
            status: self.status.parse().unwrap_or(SubmissionStatus::Uploaded),
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
