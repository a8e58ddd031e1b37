//! 教学班实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub section_id: String,
    pub section_code: String,
    pub semester: String,
    pub year: i32,
    pub instructor_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::instructors::Entity",
        from = "Column::InstructorId",
        to = "super::instructors::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_section(self) -> crate::models::sections::entities::Section {
        crate::models::sections::entities::Section {
            section_id: self.section_id,
            section_code: self.section_code,
            semester: self.semester,
            year: self.year,
            instructor_id: self.instructor_id,
        }
    }
}
