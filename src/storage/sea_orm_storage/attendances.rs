//! 考勤存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    attendance::{
        entities::Attendance,
        requests::{CreateAttendanceRequest, UpdateAttendanceRequest},
    },
    permissions::Resource,
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_attendance_impl(&self, req: CreateAttendanceRequest) -> Result<Attendance> {
        let model = ActiveModel {
            date: Set(req.date.timestamp()),
            present: Set(req.present),
            student_id: Set(req.student_id),
            lesson_id: Set(req.lesson_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建考勤失败", e))?;

        Ok(result.into_attendance())
    }

    pub async fn get_attendance_impl(
        &self,
        principal: &Principal,
        id: i64,
    ) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Attendance))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendance_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Attendance>> {
        let page = params.page_request();
        let select = Attendances::find()
            .filter(QueryScope::build(principal, Resource::Attendance, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_attendance()).collect(),
            &page,
            total,
        ))
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        let existing = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(date) = update.date {
            model.date = Set(date.timestamp());
        }
        if let Some(present) = update.present {
            model.present = Set(present);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新考勤失败", e))?;

        Ok(Some(result.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除考勤失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 时间窗口 [from, to) 内调用者可见的考勤
    pub async fn list_attendance_between_impl(
        &self,
        principal: &Principal,
        class_id: Option<i64>,
        from: i64,
        to: i64,
    ) -> Result<Vec<Attendance>> {
        let params = ListParams {
            class_id,
            ..Default::default()
        };

        let rows = Attendances::find()
            .filter(QueryScope::build(principal, Resource::Attendance, &params))
            .filter(Column::Date.gte(from))
            .filter(Column::Date.lt(to))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤统计失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_attendance()).collect())
    }
}
