use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::permissions::{Action, Resource};
use crate::models::stats::requests::AttendanceStatsQuery;
use crate::services::StatsService;

static STATS_SERVICE: Lazy<StatsService> = Lazy::new(StatsService::new_lazy);

pub async fn user_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.user_stats(&req).await
}

pub async fn attendance_stats(
    req: HttpRequest,
    query: web::Query<AttendanceStatsQuery>,
) -> ActixResult<HttpResponse> {
    STATS_SERVICE
        .attendance_stats(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/stats")
            .wrap(RequirePermission::new(Resource::Statistics, Action::Read))
            .wrap(RequireSession)
            .route("/users", web::get().to(user_stats))
            .route("/attendance", web::get().to(attendance_stats)),
    );
}
