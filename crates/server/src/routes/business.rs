use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use models::business;
use service::business_service::{self, BusinessInput, BusinessPatch};
use service::filters::BusinessFilter;
use service::pagination::Pagination;
use service::views::BusinessView;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::identity::{OptionalAuth, RequireAuth};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BusinessQuery {
    /// Case-insensitive substring of the city
    pub city: Option<String>,
    /// Exact category label
    pub category: Option<String>,
    /// 1-based page; omit for the full list
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(
    post,
    path = "/api/business",
    tag = "business",
    security(("bearer" = [])),
    request_body = crate::openapi::BusinessRequest,
    responses(
        (status = 201, description = "Registered, pending approval", body = crate::openapi::BusinessDoc),
        (status = 400, description = "Missing fields", body = crate::openapi::MessageResponse),
        (status = 403, description = "Caller is not a business owner", body = crate::openapi::MessageResponse),
        (status = 409, description = "Caller already has a business", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiJson(input): ApiJson<BusinessInput>,
) -> Result<(StatusCode, Json<business::Model>), ApiError> {
    let created = business_service::create_business(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/business",
    tag = "business",
    params(BusinessQuery),
    responses((status = 200, description = "Visible businesses", body = [crate::openapi::BusinessDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    OptionalAuth(caller): OptionalAuth,
    ApiQuery(q): ApiQuery<BusinessQuery>,
) -> Result<Json<Vec<BusinessView>>, ApiError> {
    let filter = BusinessFilter { city: q.city, category: q.category };
    let page = Pagination::from_query(q.page, q.per_page);
    let items = business_service::list_businesses(&state.db, caller.as_ref(), &filter, page).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/business/{id}",
    tag = "business",
    params(("id" = Uuid, Path, description = "Business id")),
    responses(
        (status = 200, description = "Business with owner", body = crate::openapi::BusinessDoc),
        (status = 404, description = "Missing or not visible", body = crate::openapi::MessageResponse)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    OptionalAuth(caller): OptionalAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BusinessView>, ApiError> {
    Ok(Json(business_service::get_business(&state.db, caller.as_ref(), id).await?))
}

#[utoipa::path(
    put,
    path = "/api/business/{id}",
    tag = "business",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Business id")),
    request_body = crate::openapi::BusinessPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BusinessDoc),
        (status = 403, description = "Not the owner", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<BusinessPatch>,
) -> Result<Json<business::Model>, ApiError> {
    Ok(Json(business_service::update_business(&state.db, &caller, id, patch).await?))
}

#[utoipa::path(
    get,
    path = "/api/business/my/business",
    tag = "business",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's business", body = crate::openapi::BusinessDoc),
        (status = 404, description = "No business found for this user", body = crate::openapi::MessageResponse)
    )
)]
pub async fn mine(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<business::Model>, ApiError> {
    Ok(Json(business_service::my_business(&state.db, &caller).await?))
}

#[utoipa::path(
    put,
    path = "/api/business/approve/{id}",
    tag = "business",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Business id")),
    responses(
        (status = 200, description = "Approved", body = crate::openapi::ApprovalResponse),
        (status = 403, description = "Admin only", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn approve(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let approved = business_service::approve_business(&state.db, &caller, id).await?;
    Ok(Json(serde_json::json!({"message": "Business approved successfully", "business": approved})))
}
