use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::business;
use models::product::{self, NewProduct, ProductCategory};
use models::user::Role;
use models::validate;

use crate::access::{can_view_business, ensure_can_manage, require_role, sees_unapproved};
use crate::auth::domain::AuthUser;
use crate::errors::{missing_fields, ServiceError};
use crate::filters::ProductFilter;
use crate::pagination::{paginate, Pagination};
use crate::views::ProductView;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub price: Option<f64>,
    pub category: String,
    pub description: String,
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub availability: Option<bool>,
}

/// Add a product to the caller's business, which must already be approved.
pub async fn create_product(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: ProductInput,
) -> Result<ProductView, ServiceError> {
    require_role(caller, &[Role::Business])?;
    let Some(price) = input.price else { return Err(missing_fields()) };
    if [&input.name, &input.category, &input.description].iter().any(|s| s.trim().is_empty()) {
        return Err(missing_fields());
    }
    let owned = business::find_by_owner(db, caller.id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("You must register a business first".into()))?;
    if !owned.approved {
        return Err(ServiceError::Forbidden("Your business must be approved before adding products".into()));
    }
    let new = NewProduct {
        name: input.name,
        price,
        category: ProductCategory::parse(&input.category)?,
        description: input.description,
        availability: input.availability.unwrap_or(true),
    };
    let created = product::create(db, owned.id, new).await?;
    info!(product_id = %created.id, business_id = %owned.id, "product_created");
    Ok(ProductView::new(created, Some(&owned)))
}

/// Products visible to the caller, joined with their business in one query.
pub async fn list_products(
    db: &DatabaseConnection,
    caller: Option<&AuthUser>,
    filter: &ProductFilter,
    page: Option<Pagination>,
) -> Result<Vec<ProductView>, ServiceError> {
    let Some(cond) = filter.condition(sees_unapproved(caller)) else {
        return Ok(Vec::new());
    };
    let query = product::Entity::find()
        .find_also_related(business::Entity)
        .filter(cond)
        .order_by_asc(product::Column::CreatedAt);
    let rows = paginate(query, page).all(db).await.map_err(ServiceError::db)?;
    Ok(rows.into_iter().map(|(p, b)| ProductView::new(p, b.as_ref())).collect())
}

async fn load_with_business(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<(product::Model, business::Model), ServiceError> {
    match product::Entity::find_by_id(id)
        .find_also_related(business::Entity)
        .one(db)
        .await
        .map_err(ServiceError::db)?
    {
        Some((p, Some(b))) => Ok((p, b)),
        _ => Err(ServiceError::not_found("Product")),
    }
}

/// Same visibility as the owning business.
pub async fn get_product(
    db: &DatabaseConnection,
    caller: Option<&AuthUser>,
    id: Uuid,
) -> Result<ProductView, ServiceError> {
    let (p, b) = load_with_business(db, id).await?;
    if !can_view_business(caller, &b) {
        return Err(ServiceError::not_found("Product"));
    }
    Ok(ProductView::new(p, Some(&b)))
}

pub async fn update_product(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: Uuid,
    patch: ProductPatch,
) -> Result<ProductView, ServiceError> {
    let (p, b) = load_with_business(db, id).await?;
    ensure_can_manage(caller, b.owner_id, "update this product")?;

    let mut am: product::ActiveModel = p.into();
    if let Some(name) = patch.name {
        am.name = Set(product::validate_name(&name)?);
    }
    if let Some(price) = patch.price {
        am.price = Set(validate::price(price)?);
    }
    if let Some(category) = patch.category {
        am.category = Set(ProductCategory::parse(&category)?);
    }
    if let Some(description) = patch.description {
        am.description = Set(product::validate_description(&description)?);
    }
    if let Some(availability) = patch.availability {
        am.availability = Set(availability);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    info!(product_id = %updated.id, by = %caller.id, "product_updated");
    Ok(ProductView::new(updated, Some(&b)))
}

pub async fn delete_product(db: &DatabaseConnection, caller: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
    let (p, b) = load_with_business(db, id).await?;
    ensure_can_manage(caller, b.owner_id, "delete this product")?;
    product::Entity::delete_by_id(p.id).exec(db).await.map_err(ServiceError::db)?;
    info!(product_id = %p.id, by = %caller.id, "product_deleted");
    Ok(())
}

/// Inventory of the caller's own business, approved or not.
pub async fn my_products(db: &DatabaseConnection, caller: &AuthUser) -> Result<Vec<ProductView>, ServiceError> {
    require_role(caller, &[Role::Business])?;
    let owned = business::find_by_owner(db, caller.id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No business found".into()))?;
    let products = product::Entity::find()
        .filter(product::Column::BusinessId.eq(owned.id))
        .order_by_asc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(products.into_iter().map(|p| ProductView::new(p, Some(&owned))).collect())
}
