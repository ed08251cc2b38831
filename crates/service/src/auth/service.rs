use std::sync::Arc;

use models::user::{self, NewUser, Role};
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::{password, token};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthSettings> for AuthConfig {
    fn from(s: &configs::AuthSettings) -> Self {
        Self { jwt_secret: s.jwt_secret.clone(), token_ttl_hours: s.token_ttl_hours }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new account and return it with a fresh token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let input = RegisterInput {
    ///     name: "Jane Smith".into(),
    ///     email: "Jane@Example.com".into(),
    ///     password: "customer123".into(),
    ///     role: None,
    ///     city: "Los Angeles".into(),
    /// };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "jane@example.com");
    /// assert_eq!(session.user.role.as_str(), "customer");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let name = input.name.trim();
        let email = input.email.trim();
        let city = input.city.trim();
        if name.is_empty() || email.is_empty() || input.password.is_empty() || city.is_empty() {
            return Err(AuthError::Validation("Please provide all required fields".into()));
        }
        let role = match input.role.as_deref().map(str::trim) {
            None | Some("") => Role::Customer,
            Some(r) => Role::parse(r).map_err(|_| AuthError::Validation(format!("Invalid role '{r}'")))?,
        };
        if role == Role::Admin {
            warn!("attempt to self-register an admin account");
            return Err(AuthError::Forbidden("Cannot register as admin".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("Password must be at least {MIN_PASSWORD_LEN} characters")));
        }
        let email = user::validate_email(email).map_err(|_| AuthError::Validation("Please provide a valid email".into()))?;

        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let password_hash = password::hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(NewUser { name: name.to_string(), email, password_hash, role, city: city.to_string() })
            .await?;
        info!(user_id = %user.id, email = %user.email, role = user.role.as_str(), "user_registered");
        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Check credentials and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let reg = RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into(), role: Some("business".into()), city: "Chicago".into() };
    /// let _ = tokio_test::block_on(svc.register(reg));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "U@E.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = user::normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("Please provide email and password".into()));
        }
        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !password::verify_password(&input.password, &cred.password_hash)? {
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve a bearer token to the current state of its user. Deleted
    /// accounts and stale signatures both yield `InvalidToken`.
    pub async fn authenticate(&self, bearer: &str) -> Result<AuthUser, AuthError> {
        let claims = token::verify(bearer, &self.cfg.jwt_secret)?;
        let uid = claims.uid.parse().map_err(|_| AuthError::InvalidToken)?;
        self.repo.find_user_by_id(uid).await?.ok_or(AuthError::InvalidToken)
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        token::issue(user, &self.cfg.jwt_secret, self.cfg.token_ttl_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> (Arc<MockAuthRepository>, AuthService<MockAuthRepository>) {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 });
        (repo, svc)
    }

    fn input(email: &str, role: Option<&str>) -> RegisterInput {
        RegisterInput {
            name: "Mike Johnson".into(),
            email: email.into(),
            password: "business123".into(),
            role: role.map(Into::into),
            city: "New York".into(),
        }
    }

    #[tokio::test]
    async fn register_defaults_to_customer() {
        let (_, svc) = svc();
        let s = svc.register(input("john@example.com", None)).await.unwrap();
        assert_eq!(s.user.role, Role::Customer);
        let back = svc.authenticate(&s.token).await.unwrap();
        assert_eq!(back, s.user);
    }

    #[tokio::test]
    async fn register_rejects_admin_and_unknown_roles() {
        let (_, svc) = svc();
        assert!(matches!(svc.register(input("a@example.com", Some("admin"))).await, Err(AuthError::Forbidden(_))));
        assert!(matches!(svc.register(input("a@example.com", Some("owner"))).await, Err(AuthError::Validation(_))));
        let s = svc.register(input("a@example.com", Some("Business"))).await.unwrap();
        assert_eq!(s.user.role, Role::Business);
    }

    #[tokio::test]
    async fn register_validates_fields() {
        let (_, svc) = svc();
        let mut i = input("x@example.com", None);
        i.city = "  ".into();
        let err = svc.register(i).await.unwrap_err();
        assert_eq!(err.to_string(), "Please provide all required fields");

        let mut i = input("x@example.com", None);
        i.password = "12345".into();
        assert!(matches!(svc.register(i).await, Err(AuthError::Validation(_))));

        assert!(matches!(svc.register(input("not-an-email", None)).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let (_, svc) = svc();
        svc.register(input("mike@example.com", None)).await.unwrap();
        assert!(matches!(svc.register(input("MIKE@example.com", None)).await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn login_wrong_password_and_unknown_email_look_the_same() {
        let (_, svc) = svc();
        svc.register(input("mike@example.com", None)).await.unwrap();
        let wrong = svc.login(LoginInput { email: "mike@example.com".into(), password: "nope123".into() }).await.unwrap_err();
        let unknown = svc.login(LoginInput { email: "ghost@example.com".into(), password: "nope123".into() }).await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn token_of_deleted_user_is_rejected() {
        let (repo, svc) = svc();
        let s = svc.register(input("gone@example.com", None)).await.unwrap();
        repo.remove("gone@example.com").unwrap();
        assert!(matches!(svc.authenticate(&s.token).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn foreign_token_is_rejected() {
        let (_, svc) = svc();
        let s = svc.register(input("t@example.com", None)).await.unwrap();
        let other = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: "other".into(), token_ttl_hours: 1 });
        assert!(matches!(other.authenticate(&s.token).await, Err(AuthError::InvalidToken)));
    }
}
