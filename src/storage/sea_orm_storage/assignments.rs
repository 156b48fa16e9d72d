//! 作业存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    permissions::Resource,
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            start_date: Set(req.start_date.timestamp()),
            due_date: Set(req.due_date.timestamp()),
            lesson_id: Set(req.lesson_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建作业失败", e))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_impl(
        &self,
        principal: &Principal,
        id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Assignment))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Assignment>> {
        let page = params.page_request();
        let select = Assignments::find()
            .filter(QueryScope::build(principal, Resource::Assignment, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_assignment()).collect(),
            &page,
            total,
        ))
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询作业失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date.timestamp());
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }
        if let Some(lesson_id) = update.lesson_id {
            model.lesson_id = Set(lesson_id);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新作业失败", e))?;

        Ok(Some(result.into_assignment()))
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除作业失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
