//! Account HTTP handlers.
//!
//! ```text
//! POST /auth/register      {"username":"ada","email":"ada@example.org","password":"analytical"}
//! POST /auth/login         {"username":"ada","password":"analytical"}
//! POST /auth/token/refresh {"refreshToken":"..."}
//! GET  /auth/profile       Authorization: Bearer <access token>
//! POST /auth/logout
//! ```
//!
//! Tokens are stateless: logout only acknowledges the request and clients
//! discard their tokens.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, get, post, web};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, Registration, RegistrationFields, TokenPair, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_field_error, map_login_error};

const INVALID_TOKEN: &str = "Invalid token";

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[schema(example = "analytical")]
    pub password: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/token/refresh`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Token issued at login.
    pub refresh_token: String,
}

/// Response for registration and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: User,
    pub tokens: TokenPair,
}

impl AuthResponse {
    fn new(message: &str, authenticated: AuthenticatedUser) -> Self {
        Self {
            message: message.to_owned(),
            user: authenticated.user,
            tokens: authenticated.tokens,
        }
    }
}

/// Response for token refresh.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Fresh access token.
    pub access_token: String,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logout successful")]
    pub message: String,
}

/// Bearer token taken from the `Authorization` header.
///
/// A missing header or another scheme is rejected with the same
/// `401 Invalid token` as an unverifiable token.
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl BearerToken {
    fn parse(req: &HttpRequest) -> Result<Self, Error> {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Self(token.to_owned()))
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))
    }

    /// Raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::parse(req))
    }
}

/// Register an account and issue tokens.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already exists", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::try_new(RegistrationFields {
        username: &body.username,
        email: &body.email,
        password: &body.password,
        first_name: body.first_name.as_deref(),
        last_name: body.last_name.as_deref(),
    })
    .map_err(map_field_error)?;
    let authenticated = state.accounts.register(&registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::new(
        "User registered successfully",
        authenticated,
    )))
}

/// Exchange credentials for tokens.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_error)?;
    let authenticated = state.accounts.login(&credentials).await?;
    Ok(web::Json(AuthResponse::new("Login successful", authenticated)))
}

/// Issue a new access token from a refresh token.
#[utoipa::path(
    post,
    path = "/auth/token/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Refreshed", body = RefreshResponse),
        (status = 401, description = "Invalid refresh token", body = Error)
    ),
    tags = ["auth"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/token/refresh")]
pub async fn refresh(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<web::Json<RefreshResponse>> {
    let access_token = state.accounts.refresh(&payload.refresh_token).await?;
    Ok(web::Json(RefreshResponse { access_token }))
}

/// Profile of the token's subject.
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 401, description = "Invalid token", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["auth"],
    operation_id = "profile",
    security(("bearerAuth" = []))
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(state.accounts.profile(token.as_str()).await?))
}

/// Acknowledge a logout.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout() -> web::Json<MessageResponse> {
    web::Json(MessageResponse {
        message: "Logout successful".to_owned(),
    })
}

/// Register the account routes under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(refresh)
        .service(profile)
        .service(logout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use crate::domain::ports::{MockAccountService, MockStudentRecords, MockUniversityRecords};
    use crate::inbound::http::validation::configure_extractors;

    #[fixture]
    fn ada() -> User {
        User {
            id: 1,
            username: "ada".to_owned(),
            email: "ada@example.org".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: None,
        }
    }

    fn authenticated(user: User) -> AuthenticatedUser {
        AuthenticatedUser {
            user,
            tokens: TokenPair {
                access_token: "access".to_owned(),
                refresh_token: "refresh".to_owned(),
            },
        }
    }

    async fn call(
        accounts: MockAccountService,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let state = web::Data::new(HttpState::new(
            Arc::new(MockStudentRecords::new()),
            Arc::new(MockUniversityRecords::new()),
            Arc::new(accounts),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .configure(configure_extractors)
                .service(web::scope("/auth").configure(configure)),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[rstest]
    #[actix_web::test]
    async fn register_returns_user_and_tokens(ada: User) {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_register()
            .withf(|registration| registration.username() == "ada")
            .return_once(move |_| Ok(authenticated(ada)));

        let (status, body) = call(
            accounts,
            actix_test::TestRequest::post().uri("/auth/register").set_json(json!({
                "username": "ada",
                "email": "ada@example.org",
                "password": "analytical",
                "firstName": "Ada"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["tokens"]["accessToken"], "access");
        assert_eq!(body["user"]["username"], "ada");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn short_passwords_never_reach_the_service() {
        let (status, body) = call(
            MockAccountService::new(),
            actix_test::TestRequest::post().uri("/auth/register").set_json(json!({
                "username": "ada", "email": "ada@example.org", "password": "abc"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "password");
    }

    #[actix_web::test]
    async fn duplicate_registration_is_a_conflict() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_register()
            .return_once(|_| Err(Error::conflict("Username already exists")));

        let (status, body) = call(
            accounts,
            actix_test::TestRequest::post().uri("/auth/register").set_json(json!({
                "username": "ada", "email": "ada@example.org", "password": "analytical"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Username already exists");
    }

    #[actix_web::test]
    async fn failed_login_is_unauthorised() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("Invalid credentials")));

        let (status, body) = call(
            accounts,
            actix_test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "username": "ada", "password": "wrong" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[actix_web::test]
    async fn refresh_returns_a_new_access_token() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_refresh()
            .withf(|token| token == "refresh")
            .return_once(|_| Ok("fresh".to_owned()));

        let (status, body) = call(
            accounts,
            actix_test::TestRequest::post()
                .uri("/auth/token/refresh")
                .set_json(json!({ "refreshToken": "refresh" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "accessToken": "fresh" }));
    }

    #[rstest]
    #[actix_web::test]
    async fn profile_reads_the_bearer_token(ada: User) {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_profile()
            .withf(|token| token == "access")
            .return_once(move |_| Ok(ada));

        let (status, body) = call(
            accounts,
            actix_test::TestRequest::get()
                .uri("/auth/profile")
                .insert_header((header::AUTHORIZATION, "Bearer access")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ada@example.org");
    }

    #[rstest]
    #[case::missing(None)]
    #[case::basic_scheme(Some("Basic YWRhOnB3"))]
    #[case::empty_bearer(Some("Bearer "))]
    #[actix_web::test]
    async fn profile_without_bearer_token_is_unauthorised(#[case] authorization: Option<&str>) {
        let mut request = actix_test::TestRequest::get().uri("/auth/profile");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }

        let (status, body) = call(MockAccountService::new(), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], INVALID_TOKEN);
    }

    #[actix_web::test]
    async fn logout_acknowledges() {
        let (status, body) = call(
            MockAccountService::new(),
            actix_test::TestRequest::post().uri("/auth/logout"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Logout successful" }));
    }
}
