//! 反馈实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub grade_id: i64,
    pub submission_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comprehension_comments: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub design_comments: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub implementation_comments: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub functionality_comments: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub general_comments: Option<String>,
    pub generated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grades::Entity",
        from = "Column::GradeId",
        to = "super::grades::Column::Id"
    )]
    Grade,
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_feedback(self) -> crate::models::feedback::entities::Feedback {
        use crate::models::feedback::entities::Feedback;
        use chrono::{DateTime, Utc};

        Feedback {
            id: self.id,
            grade_id: self.grade_id,
            submission_id: self.submission_id,
            comprehension_comments: self.comprehension_comments,
            design_comments: self.design_comments,
            implementation_comments: self.implementation_comments,
            functionality_comments: self.functionality_comments,
            general_comments: self.general_comments,
            generated_at: DateTime::<Utc>::from_timestamp(self.generated_at, 0).unwrap_or_default(),
        }
    }
}
