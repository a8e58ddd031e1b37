//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams},
        responses::StudentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            section_id: Set(req.section_id),
            group_number: Set(req.group_number),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, student_id: &str) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        params: StudentListParams,
    ) -> Result<StudentListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Students::find();

        if let Some(ref section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id.as_str()));
        }
        if let Some(group_number) = params.group_number {
            select = select.filter(Column::GroupNumber.eq(group_number));
        }

        let paginator = select
            .order_by_asc(Column::SectionId)
            .order_by_asc(Column::GroupNumber)
            .order_by_asc(Column::StudentId)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询学生页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询学生列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_student())
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::models::students::requests::{CreateStudentRequest, StudentListParams};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    fn student(id: &str, group: i32) -> CreateStudentRequest {
        CreateStudentRequest {
            student_id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            email: format!("{}@uni.edu", id.to_lowercase()),
            section_id: "SEC001".to_string(),
            group_number: group,
        }
    }

    #[tokio::test]
    async fn test_list_students_by_group() {
        let storage = SeaOrmStorage::in_memory().await;
        fixtures::section(&storage).await;

        for (id, group) in [("EST001", 1), ("EST002", 1), ("EST003", 2)] {
            storage.create_student(student(id, group)).await.unwrap();
        }

        let group_one = storage
            .list_students_with_pagination(StudentListParams {
                section_id: Some("SEC001".to_string()),
                group_number: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(group_one.pagination.total, 2);
        assert_eq!(group_one.items[0].student_id, "EST001");

        let by_email = storage.get_student_by_email("est003@uni.edu").await.unwrap();
        assert_eq!(by_email.unwrap().group_number, 2);
    }

    #[tokio::test]
    async fn test_student_requires_existing_section() {
        let storage = SeaOrmStorage::in_memory().await;
        assert!(storage.create_student(student("EST001", 1)).await.is_err());
    }
}
