//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI document for the Record Store REST API:
//! student and university records, account endpoints and health probes, plus
//! the bearer token security scheme used by `GET /auth/profile`.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Student, StudentStats, TokenPair, University, User};
use crate::inbound::http::auth::{
    AuthResponse, LoginRequest, MessageResponse, RefreshRequest, RefreshResponse, RegisterRequest,
};
use crate::inbound::http::students::{CreateStudentRequest, UpdateStudentRequest};
use crate::inbound::http::universities::{CreateUniversityRequest, UpdateUniversityRequest};

/// Security scheme name referenced by protected paths.
pub const BEARER_AUTH: &str = "bearerAuth";

/// Register the JWT bearer scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_owned());
        bearer.description = Some("Access token issued by POST /auth/login.".to_owned());
        components.add_security_scheme(BEARER_AUTH, SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the Record Store.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus record store API",
        description = "Student and university records with JWT-authenticated accounts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::search_students,
        crate::inbound::http::students::student_stats,
        crate::inbound::http::students::students_by_university,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::universities::list_universities,
        crate::inbound::http::universities::search_universities,
        crate::inbound::http::universities::get_university,
        crate::inbound::http::universities::create_university,
        crate::inbound::http::universities::update_university,
        crate::inbound::http::universities::delete_university,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::refresh,
        crate::inbound::http::auth::profile,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Student,
        StudentStats,
        University,
        User,
        TokenPair,
        Error,
        ErrorCode,
        CreateStudentRequest,
        UpdateStudentRequest,
        CreateUniversityRequest,
        UpdateUniversityRequest,
        RegisterRequest,
        LoginRequest,
        RefreshRequest,
        AuthResponse,
        RefreshResponse,
        MessageResponse,
    )),
    tags(
        (name = "students", description = "Student records"),
        (name = "universities", description = "University records"),
        (name = "auth", description = "Registration, login and tokens"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
