use sea_orm::{entity::prelude::*, sea_query::StringLen, ConnectionTrait, Iterable, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{business, errors, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ProductCategory {
    #[sea_orm(string_value = "Food & Beverages")]
    #[serde(rename = "Food & Beverages")]
    FoodAndBeverages,
    #[sea_orm(string_value = "Electronics")]
    Electronics,
    #[sea_orm(string_value = "Clothing")]
    Clothing,
    #[sea_orm(string_value = "Home & Garden")]
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    #[sea_orm(string_value = "Sports")]
    Sports,
    #[sea_orm(string_value = "Books")]
    Books,
    #[sea_orm(string_value = "Toys")]
    Toys,
    #[sea_orm(string_value = "Health & Beauty")]
    #[serde(rename = "Health & Beauty")]
    HealthAndBeauty,
    #[sea_orm(string_value = "Automotive")]
    Automotive,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndBeverages => "Food & Beverages",
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::HomeAndGarden => "Home & Garden",
            Self::Sports => "Sports",
            Self::Books => "Books",
            Self::Toys => "Toys",
            Self::HealthAndBeauty => "Health & Beauty",
            Self::Automotive => "Automotive",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, errors::ModelError> {
        let s = s.trim();
        Self::iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| errors::ModelError::Validation(format!("invalid product category '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub availability: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Business,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Business => Entity::belongs_to(business::Entity)
                .from(Column::BusinessId)
                .to(business::Column::Id)
                .into(),
        }
    }
}

impl Related<business::Entity> for Entity {
    fn to() -> RelationDef { Relation::Business.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
    pub description: String,
    pub availability: bool,
}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> { validate::required("name", name, 200) }
pub fn validate_description(d: &str) -> Result<String, errors::ModelError> { validate::required("description", d, 4000) }

pub async fn create<C: ConnectionTrait>(db: &C, business_id: Uuid, new: NewProduct) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        business_id: Set(business_id),
        name: Set(validate_name(&new.name)?),
        price: Set(validate::price(new.price)?),
        category: Set(new.category),
        description: Set(validate_description(&new.description)?),
        availability: Set(new.availability),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::ModelError::db)
}

pub async fn delete_by_business<C: ConnectionTrait>(db: &C, business_id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::BusinessId.eq(business_id))
        .exec(db)
        .await
        .map_err(errors::ModelError::db)?;
    Ok(res.rows_affected)
}
