use models::user::{self, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input. Missing fields deserialize as blank and are rejected
/// by the service with a single message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub city: String,
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (public view, no password material)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub city: String,
}

impl From<user::Model> for AuthUser {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, name: u.name, email: u.email, role: u.role, city: u.city }
    }
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
}

/// Login/registration result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(flatten)]
    pub user: AuthUser,
    pub token: String,
}
