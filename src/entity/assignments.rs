//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_date: i64,
    pub max_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub requirements: Option<String>,
    // 评分细则 JSON
    #[sea_orm(column_type = "Text")]
    pub rubric: String,
    pub section_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::SectionId"
    )]
    Section,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, default_rubric};
        use chrono::{DateTime, Utc};

        // 历史数据中的细则无法解析时使用默认细则
        let rubric = serde_json::from_str(&self.rubric).unwrap_or_else(|e| {
            tracing::warn!("Assignment {} has an unreadable rubric: {}", self.id, e);
            default_rubric()
        });

        Assignment {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date: DateTime::<Utc>::from_timestamp(self.due_date, 0).unwrap_or_default(),
            max_score: self.max_score,
            requirements: self.requirements,
            rubric,
            section_id: self.section_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
