pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::sections::requests::{CreateSectionRequest, SectionListParams};
use crate::storage::Storage;

pub struct SectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SectionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn create_section(
        &self,
        request: &HttpRequest,
        req: CreateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_section(self, request, req).await
    }

    pub async fn list_sections(
        &self,
        request: &HttpRequest,
        query: SectionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_sections(self, request, query).await
    }

    pub async fn get_section(
        &self,
        request: &HttpRequest,
        section_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_section(self, request, section_id).await
    }
}
