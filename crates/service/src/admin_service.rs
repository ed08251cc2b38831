use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use models::user::{self, Role};
use models::{business, product};

use crate::access::require_role;
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::pagination::{paginate, Pagination};
use crate::views::BusinessView;

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: u64,
    pub total_businesses: u64,
    pub approved_businesses: u64,
    pub pending_businesses: u64,
    pub total_products: u64,
}

pub async fn list_users(
    db: &DatabaseConnection,
    caller: &AuthUser,
    page: Option<Pagination>,
) -> Result<Vec<user::Model>, ServiceError> {
    require_role(caller, &[Role::Admin])?;
    let query = user::Entity::find().order_by_asc(user::Column::CreatedAt);
    paginate(query, page).all(db).await.map_err(ServiceError::db)
}

/// Remove a non-admin account together with its business and products.
pub async fn delete_user(db: &DatabaseConnection, caller: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
    require_role(caller, &[Role::Admin])?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let target = user::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("User"))?;
    if target.role == Role::Admin {
        return Err(ServiceError::Forbidden("Cannot delete admin users".into()));
    }
    let mut removed_products = 0;
    if let Some(owned) = business::find_by_owner(&txn, target.id).await? {
        removed_products = product::delete_by_business(&txn, owned.id).await?;
        business::Entity::delete_by_id(owned.id).exec(&txn).await.map_err(ServiceError::db)?;
    }
    user::hard_delete(&txn, target.id).await?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(user_id = %id, admin_id = %caller.id, removed_products, "user_deleted");
    Ok(())
}

pub async fn list_all_businesses(
    db: &DatabaseConnection,
    caller: &AuthUser,
    page: Option<Pagination>,
) -> Result<Vec<BusinessView>, ServiceError> {
    require_role(caller, &[Role::Admin])?;
    crate::business_service::list_all_businesses(db, page).await
}

pub async fn stats(db: &DatabaseConnection, caller: &AuthUser) -> Result<AdminStats, ServiceError> {
    require_role(caller, &[Role::Admin])?;
    let total_users = user::Entity::find().count(db).await.map_err(ServiceError::db)?;
    let total_businesses = business::Entity::find().count(db).await.map_err(ServiceError::db)?;
    let approved_businesses = business::Entity::find()
        .filter(business::Column::Approved.eq(true))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    let total_products = product::Entity::find().count(db).await.map_err(ServiceError::db)?;
    Ok(AdminStats {
        total_users,
        total_businesses,
        approved_businesses,
        pending_businesses: total_businesses.saturating_sub(approved_businesses),
        total_products,
    })
}
