use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub cookie_secure: bool,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, settings: &configs::AuthSettings) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let auth = Arc::new(AuthService::new(repo, AuthConfig::from(settings)));
        Self { db, auth, cookie_secure: settings.cookie_secure }
    }
}
