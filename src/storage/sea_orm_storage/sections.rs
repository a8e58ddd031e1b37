//! 教学班存储操作

use super::SeaOrmStorage;
use crate::entity::sections::{ActiveModel, Column, Entity as Sections};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, SectionListParams},
        responses::SectionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_section_impl(&self, req: CreateSectionRequest) -> Result<Section> {
        let model = ActiveModel {
            section_id: Set(req.section_id),
            section_code: Set(req.section_code),
            semester: Set(req.semester),
            year: Set(req.year),
            instructor_id: Set(req.instructor_id),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("创建教学班失败: {e}")))?;

        Ok(result.into_section())
    }

    pub async fn get_section_by_id_impl(&self, section_id: &str) -> Result<Option<Section>> {
        let result = Sections::find_by_id(section_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教学班失败: {e}")))?;

        Ok(result.map(|m| m.into_section()))
    }

    pub async fn list_sections_with_pagination_impl(
        &self,
        params: SectionListParams,
    ) -> Result<SectionListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Sections::find();

        if let Some(instructor_id) = params.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }
        if let Some(ref semester) = params.semester {
            select = select.filter(Column::Semester.eq(semester.as_str()));
        }
        if let Some(year) = params.year {
            select = select.filter(Column::Year.eq(year));
        }

        let paginator = select
            .order_by_asc(Column::SectionId)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            CodeMentorError::database_operation(format!("查询教学班总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            CodeMentorError::database_operation(format!("查询教学班页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询教学班列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_section())
            .collect();

        Ok(SectionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::models::sections::requests::{CreateSectionRequest, SectionListParams};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    #[tokio::test]
    async fn test_create_and_filter_sections() {
        let storage = SeaOrmStorage::in_memory().await;
        let instructor = fixtures::instructor(&storage).await;

        for (id, semester) in [("SEC001", "2025-1"), ("SEC002", "2025-2")] {
            storage
                .create_section(CreateSectionRequest {
                    section_id: id.to_string(),
                    section_code: format!("POO-{id}"),
                    semester: semester.to_string(),
                    year: 2025,
                    instructor_id: instructor.id,
                })
                .await
                .unwrap();
        }

        let found = storage.get_section_by_id("SEC002").await.unwrap().unwrap();
        assert_eq!(found.semester, "2025-2");
        assert!(storage.get_section_by_id("NOPE").await.unwrap().is_none());

        let filtered = storage
            .list_sections_with_pagination(SectionListParams {
                semester: Some("2025-1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].section_id, "SEC001");
    }

    #[tokio::test]
    async fn test_section_requires_existing_instructor() {
        let storage = SeaOrmStorage::in_memory().await;
        let result = storage
            .create_section(CreateSectionRequest {
                section_id: "SEC404".to_string(),
                section_code: "X".to_string(),
                semester: "2025-1".to_string(),
                year: 2025,
                instructor_id: 42,
            })
            .await;
        assert!(result.is_err());
    }
}
