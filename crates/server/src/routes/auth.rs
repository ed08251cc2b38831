use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::identity::{RequireAuth, AUTH_COOKIE};
use crate::state::ServerState;

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::AuthResponse),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::MessageResponse),
        (status = 403, description = "Admin self-registration", body = crate::openapi::MessageResponse),
        (status = 409, description = "Email already registered", body = crate::openapi::MessageResponse)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, CookieJar, Json<AuthSession>), ApiError> {
    let session = state.auth.register(input).await?;
    let jar = jar.add(session_cookie(session.token.clone(), state.cookie_secure));
    Ok((StatusCode::CREATED, jar, Json(session)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in; also sets the auth_token cookie", body = crate::openapi::AuthResponse),
        (status = 401, description = "Invalid email or password", body = crate::openapi::MessageResponse)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let session = state.auth.login(input).await?;
    let jar = jar.add(session_cookie(session.token.clone(), state.cookie_secure));
    Ok((jar, Json(session)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = crate::openapi::UserDoc),
        (status = 401, description = "Not authenticated", body = crate::openapi::MessageResponse)
    )
)]
pub async fn me(RequireAuth(user): RequireAuth) -> Json<AuthUser> {
    Json(user)
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}
