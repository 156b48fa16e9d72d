//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub first_name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<i64>,
    pub sex: Option<String>,
    pub class_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lessons::Entity")]
    Lessons,
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
    #[sea_orm(has_many = "super::attendances::Entity")]
    Attendances,
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lessons.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl Related<super::attendances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 角色或状态无法解析时返回 None，该行对上层不可见
    pub fn into_user(self) -> Option<crate::models::users::entities::User> {
        use crate::models::users::entities::{User, UserRole, UserStatus};

        let Ok(role) = self.role.parse::<UserRole>() else {
            tracing::warn!("User {} has unknown role '{}', ignored", self.id, self.role);
            return None;
        };
        let Ok(status) = self.status.parse::<UserStatus>() else {
            tracing::warn!(
                "User {} has unknown status '{}', ignored",
                self.id,
                self.status
            );
            return None;
        };

        Some(User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role,
            status,
            first_name: self.first_name,
            surname: self.surname,
            phone: self.phone,
            address: self.address,
            birthday: self.birthday.map(super::ts),
            sex: self.sex,
            class_id: self.class_id,
            parent_id: self.parent_id,
            last_login: self.last_login.map(super::ts),
            created_at: super::ts(self.created_at),
            updated_at: super::ts(self.updated_at),
        })
    }
}
