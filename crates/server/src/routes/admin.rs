use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::types::Message;
use models::user;
use service::admin_service::{self, AdminStats};
use service::pagination::Pagination;
use service::views::BusinessView;

use crate::errors::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::identity::RequireAuth;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All accounts, without passwords", body = [crate::openapi::UserDoc]),
        (status = 403, description = "Admin only", body = crate::openapi::MessageResponse)
    )
)]
pub async fn list_users(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<user::Model>>, ApiError> {
    let page = Pagination::from_query(q.page, q.per_page);
    Ok(Json(admin_service::list_users(&state.db, &caller, page).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/user/{id}",
    tag = "admin",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Removed with business and products", body = crate::openapi::MessageResponse),
        (status = 403, description = "Admin only, or target is an admin", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, ApiError> {
    admin_service::delete_user(&state.db, &caller, id).await?;
    Ok(Json(Message::new("User removed successfully")))
}

#[utoipa::path(
    get,
    path = "/api/admin/businesses",
    tag = "admin",
    security(("bearer" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All businesses including pending", body = [crate::openapi::BusinessDoc]),
        (status = 403, description = "Admin only", body = crate::openapi::MessageResponse)
    )
)]
pub async fn list_businesses(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<BusinessView>>, ApiError> {
    let page = Pagination::from_query(q.page, q.per_page);
    Ok(Json(admin_service::list_all_businesses(&state.db, &caller, page).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = crate::openapi::StatsDoc),
        (status = 403, description = "Admin only", body = crate::openapi::MessageResponse)
    )
)]
pub async fn stats(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<AdminStats>, ApiError> {
    Ok(Json(admin_service::stats(&state.db, &caller).await?))
}
