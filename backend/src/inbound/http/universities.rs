//! University HTTP handlers.
//!
//! ```text
//! GET    /api/universities
//! GET    /api/universities/search?name=oxf
//! GET    /api/universities/{id}
//! POST   /api/universities {"name":"Oxford University","location":"Oxford, UK"}
//! PUT    /api/universities/{id}
//! DELETE /api/universities/{id}
//! ```
//!
//! Deleting a university removes its students first.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewUniversity, University, UniversityPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_field_error;

/// Request body for `POST /api/universities`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUniversityRequest {
    #[schema(example = "Oxford University")]
    pub name: String,
    #[schema(example = "Oxford, UK")]
    pub location: String,
}

impl TryFrom<CreateUniversityRequest> for NewUniversity {
    type Error = Error;

    fn try_from(value: CreateUniversityRequest) -> Result<Self, Self::Error> {
        Self::try_new(&value.name, &value.location).map_err(map_field_error)
    }
}

/// Request body for `PUT /api/universities/{id}`. Any `students` key in the
/// body is ignored: students are moved through their own endpoint.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUniversityRequest {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl TryFrom<UpdateUniversityRequest> for UniversityPatch {
    type Error = Error;

    fn try_from(value: UpdateUniversityRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.name.as_deref(), value.location.as_deref()).map_err(map_field_error)
    }
}

/// Query string for university search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UniversitySearchQuery {
    /// Fragment matched case-insensitively against the name.
    pub name: String,
}

/// List universities with their students.
#[utoipa::path(
    get,
    path = "/api/universities",
    responses((status = 200, description = "Universities", body = [University])),
    tags = ["universities"],
    operation_id = "listUniversities",
    security([])
)]
#[get("/universities")]
pub async fn list_universities(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<University>>> {
    Ok(web::Json(state.universities.list_universities().await?))
}

/// Case-insensitive name search.
#[utoipa::path(
    get,
    path = "/api/universities/search",
    params(UniversitySearchQuery),
    responses((status = 200, description = "Matching universities", body = [University])),
    tags = ["universities"],
    operation_id = "searchUniversities",
    security([])
)]
#[get("/universities/search")]
pub async fn search_universities(
    state: web::Data<HttpState>,
    query: web::Query<UniversitySearchQuery>,
) -> ApiResult<web::Json<Vec<University>>> {
    Ok(web::Json(
        state.universities.search_universities(&query.name).await?,
    ))
}

/// Fetch one university.
#[utoipa::path(
    get,
    path = "/api/universities/{id}",
    params(("id" = i64, Path, description = "University identifier")),
    responses(
        (status = 200, description = "University", body = University),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["universities"],
    operation_id = "getUniversity",
    security([])
)]
#[get("/universities/{id}")]
pub async fn get_university(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<University>> {
    Ok(web::Json(
        state.universities.get_university(path.into_inner()).await?,
    ))
}

/// Create a university.
#[utoipa::path(
    post,
    path = "/api/universities",
    request_body = CreateUniversityRequest,
    responses(
        (status = 201, description = "Created", body = University),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["universities"],
    operation_id = "createUniversity",
    security([])
)]
#[post("/universities")]
pub async fn create_university(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUniversityRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewUniversity::try_from(payload.into_inner())?;
    let created = state.universities.create_university(&draft).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update a university's name or location.
#[utoipa::path(
    put,
    path = "/api/universities/{id}",
    params(("id" = i64, Path, description = "University identifier")),
    request_body = UpdateUniversityRequest,
    responses(
        (status = 200, description = "Updated", body = University),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["universities"],
    operation_id = "updateUniversity",
    security([])
)]
#[put("/universities/{id}")]
pub async fn update_university(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUniversityRequest>,
) -> ApiResult<web::Json<University>> {
    let patch = UniversityPatch::try_from(payload.into_inner())?;
    Ok(web::Json(
        state
            .universities
            .update_university(path.into_inner(), &patch)
            .await?,
    ))
}

/// Delete a university together with its students.
#[utoipa::path(
    delete,
    path = "/api/universities/{id}",
    params(("id" = i64, Path, description = "University identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["universities"],
    operation_id = "deleteUniversity",
    security([])
)]
#[delete("/universities/{id}")]
pub async fn delete_university(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .universities
        .delete_university(path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the university routes; `search` precedes `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_universities)
        .service(search_universities)
        .service(get_university)
        .service(create_university)
        .service(update_university)
        .service(delete_university);
}
