//! 课程存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, UpdateLessonRequest},
    },
    permissions::Resource,
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            day: Set(req.day.to_string()),
            start_time: Set(req.start_time.timestamp()),
            end_time: Set(req.end_time.timestamp()),
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建课程失败", e))?;

        Ok(result.into_lesson())
    }

    pub async fn get_lesson_impl(&self, principal: &Principal, id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Lesson))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    pub async fn list_lessons_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Lesson>> {
        let page = params.page_request();
        let select = Lessons::find()
            .filter(QueryScope::build(principal, Resource::Lesson, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_lesson()).collect(),
            &page,
            total,
        ))
    }

    pub async fn update_lesson_impl(
        &self,
        id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        let existing = Lessons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(day) = update.day {
            model.day = Set(day.to_string());
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time.timestamp());
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time.timestamp());
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新课程失败", e))?;

        Ok(Some(result.into_lesson()))
    }

    pub async fn delete_lesson_impl(&self, id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除课程失败", e))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_teacher_lessons_impl(&self, teacher_id: i64) -> Result<u64> {
        Lessons::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计课程失败: {e}")))
    }
}
