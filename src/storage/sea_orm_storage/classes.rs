//! 班级存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    permissions::Resource,
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            grade_level: Set(req.grade_level),
            capacity: Set(req.capacity),
            supervisor_id: Set(req.supervisor_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建班级失败", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级（不做范围限制）
    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 获取调用者可见的班级
    pub async fn get_class_impl(&self, principal: &Principal, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Class))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Class>> {
        let page = params.page_request();
        let select = Classes::find()
            .filter(QueryScope::build(principal, Resource::Class, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_class()).collect(),
            &page,
            total,
        ))
    }

    /// 更新班级
    pub async fn update_class_impl(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let existing = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(grade_level);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(supervisor_id) = update.supervisor_id {
            model.supervisor_id = Set(Some(supervisor_id));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新班级失败", e))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级（课程级联删除，学生的 class_id 置空）
    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        use crate::entity::users::{Column as UserColumn, Entity as Users};
        use sea_orm::{ColumnTrait, TransactionTrait};

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        Users::update_many()
            .col_expr(
                UserColumn::ClassId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(UserColumn::ClassId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("解除学生分班失败: {e}")))?;

        let result = Classes::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| write_error("删除班级失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
