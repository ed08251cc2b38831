use sea_orm::{entity::prelude::*, sea_query::{Expr, StringLen}, ConnectionTrait, Iterable, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, product, user, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum BusinessCategory {
    #[sea_orm(string_value = "Restaurant")]
    Restaurant,
    #[sea_orm(string_value = "Retail")]
    Retail,
    #[sea_orm(string_value = "Electronics")]
    Electronics,
    #[sea_orm(string_value = "Fashion")]
    Fashion,
    #[sea_orm(string_value = "Grocery")]
    Grocery,
    #[sea_orm(string_value = "Healthcare")]
    Healthcare,
    #[sea_orm(string_value = "Education")]
    Education,
    #[sea_orm(string_value = "Services")]
    Services,
    #[sea_orm(string_value = "Automotive")]
    Automotive,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl BusinessCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant",
            Self::Retail => "Retail",
            Self::Electronics => "Electronics",
            Self::Fashion => "Fashion",
            Self::Grocery => "Grocery",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Services => "Services",
            Self::Automotive => "Automotive",
            Self::Other => "Other",
        }
    }

    /// Exact match on the display label.
    pub fn parse(s: &str) -> Result<Self, errors::ModelError> {
        let s = s.trim();
        Self::iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| errors::ModelError::Validation(format!("invalid business category '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub category: BusinessCategory,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub approved: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Products,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
            Relation::Products => Entity::has_many(product::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Products.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub name: String,
    pub category: BusinessCategory,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub description: Option<String>,
}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> { validate::required("name", name, 200) }
pub fn validate_address(address: &str) -> Result<String, errors::ModelError> { validate::required("address", address, 255) }
pub fn validate_city(city: &str) -> Result<String, errors::ModelError> { validate::required("city", city, 128) }
pub fn validate_phone(phone: Option<&str>) -> Result<Option<String>, errors::ModelError> { validate::optional("phone", phone, 32) }
pub fn validate_description(d: Option<&str>) -> Result<Option<String>, errors::ModelError> { validate::optional("description", d, 4000) }

/// Insert a business for `owner_id`. New businesses always start unapproved
/// unless `approved` is forced (seeding only).
pub async fn create<C: ConnectionTrait>(
    db: &C,
    owner_id: Uuid,
    new: NewBusiness,
    approved: bool,
) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        name: Set(validate_name(&new.name)?),
        category: Set(new.category),
        address: Set(validate_address(&new.address)?),
        city: Set(validate_city(&new.city)?),
        phone: Set(validate_phone(new.phone.as_deref())?),
        description: Set(validate_description(new.description.as_deref())?),
        approved: Set(approved),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db)
        .await
        .map_err(|e| errors::ModelError::on_insert(e, "You already have a registered business"))
}

pub async fn find_by_owner<C: ConnectionTrait>(db: &C, owner_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(errors::ModelError::db)
}

/// `None` when no business has `id`.
pub async fn set_approved<C: ConnectionTrait>(db: &C, id: Uuid, approved: bool) -> Result<Option<Model>, errors::ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Approved, Expr::value(approved))
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::Id.eq(id))
        .exec_with_returning(db)
        .await
        .map_err(errors::ModelError::db)?;
    Ok(res.into_iter().next())
}
