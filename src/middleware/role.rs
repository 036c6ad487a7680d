//! Role checks for the two route groups.

use axum::{extract::FromRequestParts, http::request::Parts};

use gearlend_auth::{Role, SessionClaims};
use gearlend_core::AppError;
use gearlend_models::{Principal, Student, Teacher};

use crate::middleware::auth::RequestContext;

/// Role of the route group a router serves, installed as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGroup(pub Role);

/// Ensures the request carries a principal of `required` role.
///
/// Anonymous requests get 401 pointing at the login endpoint for the
/// context's role tag; principals of the other role get 403.
pub fn check_role(context: &RequestContext, required: Role) -> Result<&Principal, AppError> {
    match &context.principal {
        None => Err(AppError::unauthorized(format!(
            "Authentication required. Log in at {}",
            context.role.login_path()
        ))),
        Some(principal) if principal.role() == required => Ok(principal),
        Some(principal) => Err(AppError::forbidden(format!(
            "Access denied. This resource requires the {} role, but you are logged in as a {}",
            required,
            principal.role()
        ))),
    }
}

fn context_from_parts(parts: &Parts, fallback: Role) -> RequestContext {
    parts
        .extensions
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| RequestContext::anonymous(fallback))
}

/// The logged-in teacher.
#[derive(Debug, Clone)]
pub struct CurrentTeacher(pub Teacher);

impl<S> FromRequestParts<S> for CurrentTeacher
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = context_from_parts(parts, Role::Teacher);
        match check_role(&context, Role::Teacher)? {
            Principal::Teacher(teacher) => Ok(CurrentTeacher(teacher.clone())),
            Principal::Student(_) => Err(AppError::forbidden(
                "Access denied. Teacher role required".to_string(),
            )),
        }
    }
}

/// The logged-in student.
#[derive(Debug, Clone)]
pub struct CurrentStudent(pub Student);

impl<S> FromRequestParts<S> for CurrentStudent
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = context_from_parts(parts, Role::Student);
        match check_role(&context, Role::Student)? {
            Principal::Student(student) => Ok(CurrentStudent(student.clone())),
            Principal::Teacher(_) => Err(AppError::forbidden(
                "Access denied. Student role required".to_string(),
            )),
        }
    }
}

/// Claims of the session that authenticated the request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionClaims);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = context_from_parts(parts, Role::Teacher);
        context.session.map(CurrentSession).ok_or_else(|| {
            AppError::unauthorized(format!(
                "Authentication required. Log in at {}",
                context.role.login_path()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;

    fn teacher_context() -> RequestContext {
        RequestContext::authenticated(
            Principal::Teacher(Teacher {
                id: 1,
                name: "Sato".to_string(),
                email: "sato@campus.example".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
            SessionClaims {
                sub: 1,
                role: Role::Teacher,
                jti: "jti".to_string(),
                iat: 0,
                exp: usize::MAX,
            },
        )
    }

    #[test]
    fn test_check_role_allows_matching_role() {
        let context = teacher_context();
        let principal = check_role(&context, Role::Teacher).unwrap();
        assert_eq!(principal.id(), 1);
    }

    #[test]
    fn test_check_role_forbids_other_role() {
        let err = check_role(&teacher_context(), Role::Student).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_anonymous_gets_login_hint_for_group() {
        let err = check_role(&RequestContext::anonymous(Role::Student), Role::Student).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert!(err.error.to_string().contains("/student/login"));

        let err = check_role(&RequestContext::anonymous(Role::Teacher), Role::Teacher).unwrap_err();
        assert!(err.error.to_string().contains("/teacher/login"));
    }

    #[test]
    fn test_context_role_follows_session() {
        let context = teacher_context();
        assert_eq!(context.role, Role::Teacher);
        assert!(context.principal.is_some());
    }
}
