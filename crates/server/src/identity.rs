//! Caller identity: a middleware resolves the token once per request and
//! the extractors below read the result.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use common::metrics::AUTH_FAILURES_TOTAL;
use service::auth::domain::AuthUser;
use tracing::debug;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    User(AuthUser),
    /// A token was presented but did not resolve to a live account.
    Rejected,
}

/// `Authorization: Bearer` wins over the cookie.
pub fn presented_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    from_header.or_else(|| jar.get(AUTH_COOKIE).map(|c| c.value().to_string()))
}

pub async fn resolve_identity(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = match presented_token(req.headers(), &jar) {
        None => Identity::Anonymous,
        Some(token) => match state.auth.authenticate(&token).await {
            Ok(user) => Identity::User(user),
            Err(e) if e.is_internal() => return ApiError::from(e).into_response(),
            Err(e) => {
                AUTH_FAILURES_TOTAL.inc();
                debug!(error = %e, "token rejected");
                Identity::Rejected
            }
        },
    };
    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Authenticated caller; 401 otherwise.
pub struct RequireAuth(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::User(user)) => Ok(Self(user.clone())),
            Some(Identity::Rejected) => Err(ApiError::unauthorized("Not authorized, token failed")),
            _ => Err(ApiError::unauthorized("Not authorized, no token")),
        }
    }
}

/// Caller if any. A rejected token reads as anonymous.
pub struct OptionalAuth(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Identity>() {
            Some(Identity::User(user)) => Some(user.clone()),
            _ => None,
        };
        Ok(Self(user))
    }
}
