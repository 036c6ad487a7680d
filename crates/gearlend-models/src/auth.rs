//! Login requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use gearlend_auth::Role;

use crate::principal::Principal;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TeacherLoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StudentLoginRequest {
    #[validate(length(min = 1, max = 7, message = "Student number must be 1 to 7 characters"))]
    #[schema(example = "S000123")]
    pub student_number: String,
}

/// Successful login. The token is also set as the session cookie.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub session_token: String,
    pub role: Role,
    pub principal: Principal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
