//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and bearer-token resolution live here so the HTTP
//! layer only deals with extracting the token and shaping responses.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::{AuthConfig, AuthService};
