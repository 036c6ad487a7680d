use axum::{
    Extension,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use gearlend_auth::{Role, SessionClaims, verify_session_token};
use gearlend_core::AppError;
use gearlend_models::Principal;

use crate::middleware::role::RouteGroup;
use crate::modules::auth::service::AuthService;
use crate::modules::students::service::StudentService;
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;

/// Per-request identity, derived once when the request enters a route group.
///
/// `role` is the session's role when a valid session exists, otherwise the
/// role of the route group the request was sent to.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub role: Role,
    pub principal: Option<Principal>,
    pub session: Option<SessionClaims>,
}

impl RequestContext {
    pub fn anonymous(role: Role) -> Self {
        Self {
            role,
            principal: None,
            session: None,
        }
    }

    pub fn authenticated(principal: Principal, session: SessionClaims) -> Self {
        Self {
            role: principal.role(),
            principal: Some(principal),
            session: Some(session),
        }
    }
}

/// Session token from `Authorization: Bearer`, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolves a session token to its principal.
///
/// Bad signatures, expired or revoked tokens and principals that no longer
/// exist all resolve to `None`.
pub async fn resolve_session(
    state: &AppState,
    token: &str,
) -> Result<Option<(Principal, SessionClaims)>, AppError> {
    let Ok(claims) = verify_session_token(token, &state.session_config) else {
        return Ok(None);
    };

    if AuthService::is_session_revoked(&state.db, &claims.jti).await? {
        tracing::debug!(jti = %claims.jti, "revoked session presented");
        return Ok(None);
    }

    let principal = match claims.role {
        Role::Teacher => TeacherService::find_teacher(&state.db, claims.sub)
            .await?
            .map(Principal::Teacher),
        Role::Student => StudentService::find_student(&state.db, claims.sub)
            .await?
            .map(Principal::Student),
    };

    Ok(principal.map(|principal| (principal, claims)))
}

/// Builds the [`RequestContext`] for the route group and stores it in the
/// request extensions.
pub async fn request_context_middleware(
    State(state): State<AppState>,
    Extension(RouteGroup(group_role)): Extension<RouteGroup>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(req.headers(), &state.session_config.cookie_name);

    let context = match token {
        Some(token) => match resolve_session(&state, &token).await? {
            Some((principal, claims)) => RequestContext::authenticated(principal, claims),
            None => RequestContext::anonymous(group_role),
        },
        None => RequestContext::anonymous(group_role),
    };

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}
