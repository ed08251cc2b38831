//! Response shapes that embed a summary of a related record.

use models::business::{self, BusinessCategory};
use models::{product, user};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl OwnerSummary {
    pub fn brief(u: &user::Model) -> Self {
        Self { id: u.id, name: u.name.clone(), email: u.email.clone(), city: None }
    }

    pub fn with_city(u: &user::Model) -> Self {
        Self { city: Some(u.city.clone()), ..Self::brief(u) }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessView {
    #[serde(flatten)]
    pub business: business::Model,
    pub owner: Option<OwnerSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessSummary {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub address: String,
    pub category: BusinessCategory,
    pub phone: Option<String>,
}

impl From<&business::Model> for BusinessSummary {
    fn from(b: &business::Model) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
            city: b.city.clone(),
            address: b.address.clone(),
            category: b.category,
            phone: b.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: product::Model,
    pub business: Option<BusinessSummary>,
}

impl ProductView {
    pub fn new(product: product::Model, business: Option<&business::Model>) -> Self {
        Self { product, business: business.map(BusinessSummary::from) }
    }
}
