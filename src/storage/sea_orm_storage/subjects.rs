//! 科目存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    permissions::Resource,
    subjects::{entities::Subject, requests::SubjectRequest},
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: SubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建科目失败", e))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_impl(&self, principal: &Principal, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Subject))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Subject>> {
        let page = params.page_request();
        let select = Subjects::find()
            .filter(QueryScope::build(principal, Resource::Subject, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_subject()).collect(),
            &page,
            total,
        ))
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        req: SubjectRequest,
    ) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.name = Set(req.name.trim().to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新科目失败", e))?;

        Ok(Some(result.into_subject()))
    }

    /// 仍有课程引用时删除失败（409）
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除科目失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
