#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use configs::DatabaseConfig;
use models::db::connect_with_config;
use models::user::{self, NewUser, Role};
use uuid::Uuid;

use crate::auth::domain::AuthUser;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            let cfg = DatabaseConfig { min_connections: 1, ..DatabaseConfig::from_env() };
            let db = connect_with_config(&cfg).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let mut cfg = DatabaseConfig::from_env();
    cfg.max_connections = cfg.max_connections.max(20);
    cfg.min_connections = 1;
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}

/// Insert a throwaway account with a unique email.
pub async fn new_user(db: &DatabaseConnection, role: Role) -> Result<AuthUser, anyhow::Error> {
    let created = user::create(db, NewUser {
        name: format!("{} tester", role.as_str()),
        email: format!("{}_{}@example.com", role.as_str(), Uuid::new_v4().simple()),
        password_hash: "$argon2id$unused".into(),
        role,
        city: "Springfield".into(),
    })
    .await?;
    Ok(AuthUser::from(created))
}
