use serde::Serialize;
use utoipa::ToSchema;

use gearlend_auth::Role;

use crate::students::Student;
use crate::teachers::Teacher;

/// The authenticated party of a request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Principal {
    Teacher(Teacher),
    Student(Student),
}

impl Principal {
    pub fn role(&self) -> Role {
        match self {
            Principal::Teacher(_) => Role::Teacher,
            Principal::Student(_) => Role::Student,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Principal::Teacher(t) => t.id,
            Principal::Student(s) => s.id,
        }
    }
}
