//! 用户与人员存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    permissions::Resource,
    users::{
        entities::{Principal, User, UserRole, UserStatus},
        requests::{NewPerson, PersonChanges},
    },
};
use crate::scope::QueryScope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 人员角色对应的权限资源
fn person_resource(role: UserRole) -> Option<Resource> {
    match role {
        UserRole::Student => Some(Resource::Student),
        UserRole::Teacher => Some(Resource::Teacher),
        UserRole::Parent => Some(Resource::Parent),
        UserRole::Admin => None,
    }
}

impl SeaOrmStorage {
    /// 创建人员
    pub async fn create_person_impl(&self, person: NewPerson) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(person.username),
            email: Set(person.email),
            password_hash: Set(person.password_hash),
            role: Set(person.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            first_name: Set(person.first_name),
            surname: Set(person.surname),
            phone: Set(person.phone),
            address: Set(person.address),
            birthday: Set(person.birthday.map(|dt| dt.timestamp())),
            sex: Set(person.sex),
            class_id: Set(person.class_id),
            parent_id: Set(person.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建用户失败", e))?;

        result
            .into_user()
            .ok_or_else(|| SchoolError::internal("新建用户的角色无法解析"))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.and_then(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.and_then(|m| m.into_user()))
    }

    /// 按角色分页列出调用者可见的人员
    pub async fn list_people_impl(
        &self,
        principal: &Principal,
        role: UserRole,
        params: &ListParams,
    ) -> Result<PaginatedResponse<User>> {
        let Some(resource) = person_resource(role) else {
            return Err(SchoolError::validation("Administrators are not listed"));
        };
        let page = params.page_request();

        let select = Users::find()
            .filter(Column::Role.eq(role.as_str()))
            .filter(QueryScope::build(principal, resource, params))
            .order_by_asc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().filter_map(|m| m.into_user()).collect(),
            &page,
            total,
        ))
    }

    /// 获取调用者可见的人员
    pub async fn get_person_impl(
        &self,
        principal: &Principal,
        role: UserRole,
        id: i64,
    ) -> Result<Option<User>> {
        let Some(resource) = person_resource(role) else {
            return Ok(None);
        };

        let result = Users::find_by_id(id)
            .filter(Column::Role.eq(role.as_str()))
            .filter(QueryScope::role_condition(principal, resource))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询人员失败: {e}")))?;

        Ok(result.and_then(|m| m.into_user()))
    }

    /// 更新人员信息
    pub async fn update_person_impl(&self, id: i64, changes: PersonChanges) -> Result<Option<User>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(email) = changes.email {
            model.email = Set(Some(email));
        }
        if let Some(first_name) = changes.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(surname) = changes.surname {
            model.surname = Set(surname);
        }
        if let Some(phone) = changes.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = changes.address {
            model.address = Set(Some(address));
        }
        if let Some(birthday) = changes.birthday {
            model.birthday = Set(Some(birthday.timestamp()));
        }
        if let Some(sex) = changes.sex {
            model.sex = Set(Some(sex));
        }
        if let Some(class_id) = changes.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(parent_id) = changes.parent_id {
            model.parent_id = Set(parent_id);
        }
        if let Some(status) = changes.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新用户失败", e))?;

        Ok(result.into_user())
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计用户失败: {e}")))
    }

    pub async fn count_children_impl(&self, parent_id: i64) -> Result<u64> {
        Users::find()
            .filter(Column::ParentId.eq(parent_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生失败: {e}")))
    }

    pub async fn count_class_students_impl(&self, class_id: i64) -> Result<u64> {
        Users::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Role.eq(UserRole::STUDENT))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级人数失败: {e}")))
    }
}
