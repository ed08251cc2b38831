use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::business::{self, BusinessCategory, NewBusiness};
use models::user::{self, Role};

use crate::access::{can_view_business, ensure_can_manage, require_role, sees_unapproved};
use crate::auth::domain::AuthUser;
use crate::errors::{missing_fields, ServiceError};
use crate::filters::BusinessFilter;
use crate::pagination::{paginate, Pagination};
use crate::views::{BusinessView, OwnerSummary};

/// Body of a business registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BusinessInput {
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub description: Option<String>,
}

/// Partial update; absent fields stay as they are. Blank `phone` or
/// `description` clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BusinessPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

/// Register the caller's business. It always starts unapproved.
pub async fn create_business(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: BusinessInput,
) -> Result<business::Model, ServiceError> {
    require_role(caller, &[Role::Business])?;
    if [&input.name, &input.category, &input.address, &input.city].iter().any(|s| s.trim().is_empty()) {
        return Err(missing_fields());
    }
    let category = BusinessCategory::parse(&input.category)?;
    if business::find_by_owner(db, caller.id).await?.is_some() {
        return Err(ServiceError::Conflict("You already have a registered business".into()));
    }
    let new = NewBusiness {
        name: input.name,
        category,
        address: input.address,
        city: input.city,
        phone: input.phone,
        description: input.description,
    };
    let created = business::create(db, caller.id, new, false).await?;
    info!(business_id = %created.id, owner_id = %caller.id, "business_registered");
    Ok(created)
}

/// Businesses visible to the caller, each with a brief owner summary.
pub async fn list_businesses(
    db: &DatabaseConnection,
    caller: Option<&AuthUser>,
    filter: &BusinessFilter,
    page: Option<Pagination>,
) -> Result<Vec<BusinessView>, ServiceError> {
    let Some(cond) = filter.condition(sees_unapproved(caller)) else {
        return Ok(Vec::new());
    };
    let query = business::Entity::find()
        .find_also_related(user::Entity)
        .filter(cond)
        .order_by_asc(business::Column::CreatedAt);
    let rows = paginate(query, page).all(db).await.map_err(ServiceError::db)?;
    Ok(rows
        .into_iter()
        .map(|(business, owner)| BusinessView { owner: owner.as_ref().map(OwnerSummary::brief), business })
        .collect())
}

/// Every business regardless of approval, for the admin dashboard.
pub async fn list_all_businesses(
    db: &DatabaseConnection,
    page: Option<Pagination>,
) -> Result<Vec<BusinessView>, ServiceError> {
    let query = business::Entity::find()
        .find_also_related(user::Entity)
        .order_by_asc(business::Column::CreatedAt);
    let rows = paginate(query, page).all(db).await.map_err(ServiceError::db)?;
    Ok(rows
        .into_iter()
        .map(|(business, owner)| BusinessView { owner: owner.as_ref().map(OwnerSummary::brief), business })
        .collect())
}

/// Pending businesses read as missing to anyone but their owner and admins.
pub async fn get_business(
    db: &DatabaseConnection,
    caller: Option<&AuthUser>,
    id: Uuid,
) -> Result<BusinessView, ServiceError> {
    let (business, owner) = business::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("Business"))?;
    if !can_view_business(caller, &business) {
        return Err(ServiceError::not_found("Business"));
    }
    Ok(BusinessView { owner: owner.as_ref().map(OwnerSummary::with_city), business })
}

pub async fn update_business(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: Uuid,
    patch: BusinessPatch,
) -> Result<business::Model, ServiceError> {
    let found = business::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("Business"))?;
    ensure_can_manage(caller, found.owner_id, "update this business")?;

    let mut am: business::ActiveModel = found.into();
    if let Some(name) = patch.name {
        am.name = Set(business::validate_name(&name)?);
    }
    if let Some(category) = patch.category {
        am.category = Set(BusinessCategory::parse(&category)?);
    }
    if let Some(address) = patch.address {
        am.address = Set(business::validate_address(&address)?);
    }
    if let Some(city) = patch.city {
        am.city = Set(business::validate_city(&city)?);
    }
    if let Some(phone) = patch.phone {
        am.phone = Set(business::validate_phone(Some(&phone))?);
    }
    if let Some(description) = patch.description {
        am.description = Set(business::validate_description(Some(&description))?);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    info!(business_id = %updated.id, by = %caller.id, "business_updated");
    Ok(updated)
}

pub async fn my_business(db: &DatabaseConnection, caller: &AuthUser) -> Result<business::Model, ServiceError> {
    require_role(caller, &[Role::Business])?;
    business::find_by_owner(db, caller.id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No business found for this user".into()))
}

/// Admin approval; approving twice is harmless.
pub async fn approve_business(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: Uuid,
) -> Result<business::Model, ServiceError> {
    require_role(caller, &[Role::Admin])?;
    let approved = business::set_approved(db, id, true)
        .await?
        .ok_or_else(|| ServiceError::not_found("Business"))?;
    info!(business_id = %id, admin_id = %caller.id, "business_approved");
    Ok(approved)
}
