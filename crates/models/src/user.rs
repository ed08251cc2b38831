use sea_orm::{entity::prelude::*, sea_query::StringLen, ConnectionTrait, DatabaseConnection, Iterable, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{business, errors, validate};

/// Account role; decides which directory operations a caller may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "business")]
    Business,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Business => "business",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Result<Self, errors::ModelError> {
        let s = s.trim();
        Role::iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| errors::ModelError::Validation(format!("invalid role '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub city: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Business,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Business => Entity::has_one(business::Entity).into() }
    }
}

impl Related<business::Entity> for Entity {
    fn to() -> RelationDef { Relation::Business.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Validated input for a new account. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub city: String,
}

pub fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

pub fn validate_email(email: &str) -> Result<String, errors::ModelError> {
    let email = normalize_email(email);
    let at_ok = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !at_ok || email.len() > 255 || email.contains(char::is_whitespace) {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(email)
}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    validate::required("name", name, 128)
}

pub fn validate_city(city: &str) -> Result<String, errors::ModelError> {
    validate::required("city", city, 128)
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, errors::ModelError> {
    let email = validate_email(&new.email)?;
    let name = validate_name(&new.name)?;
    let city = validate_city(&new.city)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(new.password_hash),
        role: Set(new.role),
        city: Set(city),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::on_insert(e, "User already exists"))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
        .map_err(errors::ModelError::db)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(errors::ModelError::db)?;
    Ok(())
}
