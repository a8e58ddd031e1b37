//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::instructors::{ActiveModel, Column, Entity as Instructors};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    instructors::{
        entities::Instructor,
        requests::{CreateInstructorRequest, InstructorListParams},
        responses::InstructorListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_instructor_impl(&self, req: CreateInstructorRequest) -> Result<Instructor> {
        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            role: Set(req.role),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_instructor())
    }

    pub async fn get_instructor_by_id_impl(&self, id: i64) -> Result<Option<Instructor>> {
        let result = Instructors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_instructor()))
    }

    pub async fn get_instructor_by_email_impl(&self, email: &str) -> Result<Option<Instructor>> {
        let result = Instructors::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_instructor()))
    }

    pub async fn list_instructors_with_pagination_impl(
        &self,
        params: InstructorListParams,
    ) -> Result<InstructorListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Instructors::find();

        // 按姓名或邮箱搜索
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        let paginator = select.order_by_asc(Column::Id).paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教师总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教师页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教师列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_instructor())
            .collect();

        Ok(InstructorListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn count_instructors_impl(&self) -> Result<u64> {
        Instructors::find()
            .count(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("统计教师失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::instructors::requests::{CreateInstructorRequest, InstructorListParams};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn request(name: &str, email: &str) -> CreateInstructorRequest {
        CreateInstructorRequest {
            name: name.to_string(),
            email: email.to_string(),
            role: Some("professor".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_instructor() {
        let storage = SeaOrmStorage::in_memory().await;
        let created = storage
            .create_instructor(request("Ada Lovelace", "ada@uni.edu"))
            .await
            .unwrap();

        let by_id = storage.get_instructor_by_id(created.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "ada@uni.edu");

        let by_email = storage.get_instructor_by_email("ada@uni.edu").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);
        assert!(storage.get_instructor_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_instructor(request("A", "same@uni.edu"))
            .await
            .unwrap();
        assert!(
            storage
                .create_instructor(request("B", "same@uni.edu"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_list_instructors_search() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_instructor(request("Grace Hopper", "grace@uni.edu"))
            .await
            .unwrap();
        storage
            .create_instructor(request("Alan Turing", "alan@uni.edu"))
            .await
            .unwrap();

        let all = storage
            .list_instructors_with_pagination(InstructorListParams::default())
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);

        let found = storage
            .list_instructors_with_pagination(InstructorListParams {
                search: Some("hopper".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].name, "Grace Hopper");
    }
}
