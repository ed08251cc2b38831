//! Service layer providing the directory's business rules on top of models.
//! - Role and ownership checks live in `access` and are applied here, not in handlers.
//! - List filters compile to SQL conditions in `filters`.
//! - Auth (registration, login, token resolution) is framework independent.

pub mod errors;
pub mod pagination;
pub mod access;
pub mod filters;
pub mod views;
pub mod auth;
pub mod business_service;
pub mod product_service;
pub mod admin_service;
pub mod seed;
#[cfg(test)]
pub mod test_support;
