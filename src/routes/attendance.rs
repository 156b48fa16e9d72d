use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::attendance::requests::{CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::services::AttendanceService;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list_attendance(&req, query.into_inner()).await
}

pub async fn get_attendance(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_attendance(&req, id.into_inner()).await
}

pub async fn create_attendance(
    req: HttpRequest,
    data: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.create_attendance(&req, data.into_inner()).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendance")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_attendance)
                            .wrap(RequirePermission::new(Resource::Attendance, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_attendance)
                            .wrap(RequirePermission::new(Resource::Attendance, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_attendance)
                            .wrap(RequirePermission::new(Resource::Attendance, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_attendance)
                            .wrap(RequirePermission::new(Resource::Attendance, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_attendance)
                            .wrap(RequirePermission::new(Resource::Attendance, Action::Delete)),
                    ),
            ),
    );
}
