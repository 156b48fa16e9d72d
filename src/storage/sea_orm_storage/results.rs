//! 成绩存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    permissions::Resource,
    results::{
        entities::ExamResult,
        requests::{CreateResultRequest, UpdateResultRequest},
    },
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_result_impl(&self, req: CreateResultRequest) -> Result<ExamResult> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            score: Set(req.score),
            student_id: Set(req.student_id),
            exam_id: Set(req.exam_id),
            assignment_id: Set(req.assignment_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建成绩失败", e))?;

        Ok(result.into_result())
    }

    pub async fn get_result_impl(
        &self,
        principal: &Principal,
        id: i64,
    ) -> Result<Option<ExamResult>> {
        let result = Results::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Result))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    pub async fn list_results_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<ExamResult>> {
        let page = params.page_request();
        let select = Results::find()
            .filter(QueryScope::build(principal, Resource::Result, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_result()).collect(),
            &page,
            total,
        ))
    }

    /// 更新成绩；改动关联时考试与作业互斥
    pub async fn update_result_impl(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ExamResult>> {
        let existing = Results::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(score) = update.score {
            model.score = Set(score);
        }
        if let Some(exam_id) = update.exam_id {
            model.exam_id = Set(Some(exam_id));
            model.assignment_id = Set(None);
        }
        if let Some(assignment_id) = update.assignment_id {
            model.assignment_id = Set(Some(assignment_id));
            model.exam_id = Set(None);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新成绩失败", e))?;

        Ok(Some(result.into_result()))
    }

    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let result = Results::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除成绩失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
