use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::types::Message;
use service::filters::ProductFilter;
use service::pagination::Pagination;
use service::product_service::{self, ProductInput, ProductPatch};
use service::views::ProductView;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::identity::{OptionalAuth, RequireAuth};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive substring of name or description
    pub keyword: Option<String>,
    /// Exact category label
    pub category: Option<String>,
    /// Case-insensitive substring of the business's city
    pub city: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductQuery {
    fn split(self) -> (ProductFilter, Option<Pagination>) {
        let page = Pagination::from_query(self.page, self.per_page);
        (ProductFilter { keyword: self.keyword, category: self.category, city: self.city }, page)
    }
}

async fn list_visible(
    state: &ServerState,
    caller: Option<&service::auth::domain::AuthUser>,
    q: ProductQuery,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let (filter, page) = q.split();
    Ok(Json(product_service::list_products(&state.db, caller, &filter, page).await?))
}

#[utoipa::path(
    post,
    path = "/api/product",
    tag = "product",
    security(("bearer" = [])),
    request_body = crate::openapi::ProductRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Missing fields or negative price", body = crate::openapi::MessageResponse),
        (status = 403, description = "Business not approved", body = crate::openapi::MessageResponse),
        (status = 404, description = "No business registered", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<ProductView>), ApiError> {
    let created = product_service::create_product(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/product",
    tag = "product",
    params(ProductQuery),
    responses((status = 200, description = "Visible products", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    OptionalAuth(caller): OptionalAuth,
    ApiQuery(q): ApiQuery<ProductQuery>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    list_visible(&state, caller.as_ref(), q).await
}

#[utoipa::path(
    get,
    path = "/api/product/search",
    tag = "product",
    params(ProductQuery),
    responses((status = 200, description = "Matching products", body = [crate::openapi::ProductDoc]))
)]
pub async fn search(
    State(state): State<ServerState>,
    OptionalAuth(caller): OptionalAuth,
    ApiQuery(q): ApiQuery<ProductQuery>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    list_visible(&state, caller.as_ref(), q).await
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    tag = "product",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with business", body = crate::openapi::ProductDoc),
        (status = 404, description = "Missing or not visible", body = crate::openapi::MessageResponse)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    OptionalAuth(caller): OptionalAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ProductView>, ApiError> {
    Ok(Json(product_service::get_product(&state.db, caller.as_ref(), id).await?))
}

#[utoipa::path(
    put,
    path = "/api/product/{id}",
    tag = "product",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 403, description = "Not the owner", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<ProductView>, ApiError> {
    Ok(Json(product_service::update_product(&state.db, &caller, id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    tag = "product",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Removed", body = crate::openapi::MessageResponse),
        (status = 403, description = "Not the owner", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, ApiError> {
    product_service::delete_product(&state.db, &caller, id).await?;
    Ok(Json(Message::new("Product removed successfully")))
}

#[utoipa::path(
    get,
    path = "/api/product/my/products",
    tag = "product",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's inventory", body = [crate::openapi::ProductDoc]),
        (status = 404, description = "No business found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn mine(
    State(state): State<ServerState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    Ok(Json(product_service::my_products(&state.db, &caller).await?))
}
