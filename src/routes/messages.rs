use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::messages::requests::CreateMessageRequest;
use crate::models::permissions::{Action, Resource};
use crate::services::MessageService;

static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.list_messages(&req, query.into_inner()).await
}

pub async fn get_message(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.get_message(&req, id.into_inner()).await
}

pub async fn send_message(
    req: HttpRequest,
    data: web::Json<CreateMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.send_message(&req, data.into_inner()).await
}

pub async fn mark_read(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.mark_read(&req, id.into_inner()).await
}

pub async fn delete_message(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.delete_message(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_messages_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/messages")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_messages)
                            .wrap(RequirePermission::new(Resource::Message, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(send_message)
                            .wrap(RequirePermission::new(Resource::Message, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_message)
                            .wrap(RequirePermission::new(Resource::Message, Action::Read)),
                    )
                    // 更新即标记已读
                    .route(
                        web::put()
                            .to(mark_read)
                            .wrap(RequirePermission::new(Resource::Message, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_message)
                            .wrap(RequirePermission::new(Resource::Message, Action::Delete)),
                    ),
            ),
    );
}
