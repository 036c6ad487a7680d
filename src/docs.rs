use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use gearlend_auth::Role;
use gearlend_config::session::DEFAULT_COOKIE_NAME;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginResponse, MessageResponse, Principal, StudentLoginRequest, TeacherLoginRequest,
};
use crate::modules::items::model::{CreateItemForm, ItemFilter, ItemResponse, UpdateItemDto};
use crate::modules::loans::model::{
    GrantLoanDto, Loan, LoanDetails, ReturnLoansDto, ReturnOutcome, StudentLoanStatus,
};
use crate::modules::statistics::model::{DailyLoanPoint, ItemLoanReport, ItemLoanSeries};
use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::teacher_login,
        crate::modules::auth::controller::teacher_logout,
        crate::modules::auth::controller::teacher_home,
        crate::modules::auth::controller::student_login,
        crate::modules::auth::controller::student_logout,
        crate::modules::auth::controller::student_home,
        crate::modules::teachers::controller::register_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::items::controller::create_item,
        crate::modules::items::controller::get_items,
        crate::modules::items::controller::get_item,
        crate::modules::items::controller::update_item,
        crate::modules::items::controller::delete_item,
        crate::modules::items::controller::get_available_items,
        crate::modules::loans::controller::grant_loan,
        crate::modules::loans::controller::get_open_loans,
        crate::modules::loans::controller::get_loan_history,
        crate::modules::loans::controller::return_loans,
        crate::modules::loans::controller::get_loan_status,
        crate::modules::statistics::controller::get_loan_statistics,
    ),
    components(
        schemas(
            Role,
            Principal,
            TeacherLoginRequest,
            StudentLoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            ItemResponse,
            CreateItemForm,
            UpdateItemDto,
            ItemFilter,
            Loan,
            LoanDetails,
            GrantLoanDto,
            ReturnLoansDto,
            ReturnOutcome,
            StudentLoanStatus,
            DailyLoanPoint,
            ItemLoanSeries,
            ItemLoanReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout and home for teachers and students"),
        (name = "Teachers", description = "Teacher account management"),
        (name = "Students", description = "Student account management"),
        (name = "Items", description = "Lendable inventory"),
        (name = "Loans", description = "Granting and returning loans"),
        (name = "Statistics", description = "Daily loan statistics per item")
    ),
    info(
        title = "gearlend API",
        version = "0.1.0",
        description = "Equipment lending for a school: teachers manage inventory and students, students borrow and return items.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_COOKIE_NAME))),
            );
        }
    }
}
