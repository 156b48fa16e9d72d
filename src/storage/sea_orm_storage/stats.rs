//! 统计查询

use super::SeaOrmStorage;
use crate::entity::classes::Entity as Classes;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SchoolError};
use crate::models::stats::responses::UserStatsResponse;
use crate::models::users::entities::UserRole;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 各角色人数与班级数
    pub async fn user_stats_impl(&self) -> Result<UserStatsResponse> {
        let mut stats = UserStatsResponse::default();

        for role in UserRole::all_roles() {
            let count = Users::find()
                .filter(UserColumn::Role.eq(role.as_str()))
                .count(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("统计用户失败: {e}")))?
                as i64;

            match role {
                UserRole::Admin => stats.admins = count,
                UserRole::Teacher => stats.teachers = count,
                UserRole::Student => stats.students = count,
                UserRole::Parent => stats.parents = count,
            }
        }

        stats.classes = Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级失败: {e}")))?
            as i64;

        Ok(stats)
    }
}
