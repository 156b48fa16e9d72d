//! 考试存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    exams::{
        entities::Exam,
        requests::{CreateExamRequest, UpdateExamRequest},
    },
    permissions::Resource,
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            start_time: Set(req.start_time.timestamp()),
            end_time: Set(req.end_time.timestamp()),
            lesson_id: Set(req.lesson_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建考试失败", e))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_impl(&self, principal: &Principal, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Exam))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn list_exams_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Exam>> {
        let page = params.page_request();
        let select = Exams::find()
            .filter(QueryScope::build(principal, Resource::Exam, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_exam()).collect(),
            &page,
            total,
        ))
    }

    pub async fn update_exam_impl(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        let existing = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time.timestamp());
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time.timestamp());
        }
        if let Some(lesson_id) = update.lesson_id {
            model.lesson_id = Set(lesson_id);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新考试失败", e))?;

        Ok(Some(result.into_exam()))
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除考试失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
