//! 消息存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ListParams, PaginatedResponse,
    messages::{entities::Message, requests::CreateMessageRequest},
    permissions::Resource,
    users::entities::Principal,
};
use crate::scope::QueryScope;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_message_impl(
        &self,
        sender_id: i64,
        req: CreateMessageRequest,
    ) -> Result<Message> {
        let model = ActiveModel {
            sender_id: Set(sender_id),
            recipient_id: Set(req.recipient_id),
            subject: Set(req.subject.trim().to_string()),
            body: Set(req.body),
            read_at: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("发送消息失败", e))?;

        Ok(result.into_message())
    }

    pub async fn get_message_impl(&self, principal: &Principal, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id)
            .filter(QueryScope::role_condition(principal, Resource::Message))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询消息失败: {e}")))?;

        Ok(result.map(|m| m.into_message()))
    }

    /// 最新的消息在前
    pub async fn list_messages_impl(
        &self,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<PaginatedResponse<Message>> {
        let page = params.page_request();
        let select = Messages::find()
            .filter(QueryScope::build(principal, Resource::Message, params))
            .order_by_desc(Column::Id);

        let (rows, total) = self.fetch_page(select, &page).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_message()).collect(),
            &page,
            total,
        ))
    }

    /// 标记已读，已读过的保留首次时间
    pub async fn mark_message_read_impl(&self, id: i64) -> Result<Option<Message>> {
        let existing = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询消息失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };
        if existing.read_at.is_some() {
            return Ok(Some(existing.into_message()));
        }

        let mut model: ActiveModel = existing.into();
        model.read_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新消息失败", e))?;

        Ok(Some(result.into_message()))
    }

    pub async fn delete_message_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error("删除消息失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
