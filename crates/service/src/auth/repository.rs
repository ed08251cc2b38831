use async_trait::async_trait;
use models::user::NewUser;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, (AuthUser, String)>>, // key: email, value: (user, hash)
    }

    impl MockAuthRepository {
        fn users(&self) -> Result<MutexGuard<'_, HashMap<String, (AuthUser, String)>>, AuthError> {
            self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))
        }

        /// Drop a user, as an admin deletion would.
        pub fn remove(&self, email: &str) -> Result<(), AuthError> {
            self.users()?.remove(email);
            Ok(())
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users()?.get(email).map(|(u, _)| u.clone()))
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users()?.values().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
        }

        async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError> {
            let mut users = self.users()?;
            if users.contains_key(&new.email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), name: new.name, email: new.email.clone(), role: new.role, city: new.city };
            users.insert(new.email, (user.clone(), new.password_hash));
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            Ok(self
                .users()?
                .values()
                .find(|(u, _)| u.id == user_id)
                .map(|(u, h)| Credentials { user_id: u.id, password_hash: h.clone() }))
        }
    }
}
