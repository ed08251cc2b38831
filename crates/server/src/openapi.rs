use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `customer` (default) or `business`
    pub role: Option<String>,
    pub city: String,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub city: String,
    pub token: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub city: String,
}

#[derive(ToSchema)]
pub struct OwnerDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
}

#[derive(ToSchema)]
pub struct BusinessRequest {
    pub name: String,
    /// One of Restaurant, Retail, Electronics, Fashion, Grocery, Healthcare,
    /// Education, Services, Automotive, Other
    pub category: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct BusinessPatchDoc {
    pub name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct BusinessDoc {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub approved: bool,
    pub created_at: String,
    pub updated_at: String,
    pub owner: Option<OwnerDoc>,
}

#[derive(ToSchema)]
pub struct ApprovalResponse {
    pub message: String,
    pub business: BusinessDoc,
}

#[derive(ToSchema)]
pub struct BusinessSummaryDoc {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub address: String,
    pub category: String,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    /// One of "Food & Beverages", Electronics, Clothing, "Home & Garden",
    /// Sports, Books, Toys, "Health & Beauty", Automotive, Other
    pub category: String,
    pub description: String,
    pub availability: Option<bool>,
}

#[derive(ToSchema)]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub availability: Option<bool>,
}

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub availability: bool,
    pub created_at: String,
    pub updated_at: String,
    pub business: Option<BusinessSummaryDoc>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StatsDoc {
    pub totalUsers: u64,
    pub totalBusinesses: u64,
    pub approvedBusinesses: u64,
    pub pendingBusinesses: u64,
    pub totalProducts: u64,
}

/// Registers the `bearer` scheme referenced by protected paths.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::auth::logout,
        crate::routes::business::create,
        crate::routes::business::list,
        crate::routes::business::get,
        crate::routes::business::update,
        crate::routes::business::mine,
        crate::routes::business::approve,
        crate::routes::product::create,
        crate::routes::product::list,
        crate::routes::product::search,
        crate::routes::product::get,
        crate::routes::product::update,
        crate::routes::product::delete,
        crate::routes::product::mine,
        crate::routes::admin::list_users,
        crate::routes::admin::delete_user,
        crate::routes::admin::list_businesses,
        crate::routes::admin::stats,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserDoc,
            OwnerDoc,
            BusinessRequest,
            BusinessPatchDoc,
            BusinessDoc,
            ApprovalResponse,
            BusinessSummaryDoc,
            ProductRequest,
            ProductPatchDoc,
            ProductDoc,
            StatsDoc,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "business"),
        (name = "product"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
