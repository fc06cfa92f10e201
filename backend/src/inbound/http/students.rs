//! Student HTTP handlers.
//!
//! ```text
//! GET    /api/students
//! GET    /api/students/search?query=mar
//! GET    /api/students/stats
//! GET    /api/students/university/{id}
//! GET    /api/students/{id}
//! POST   /api/students {"firstName":"Emily","lastName":"Martinez","email":"..","university":{"id":1}}
//! PUT    /api/students/{id}
//! DELETE /api/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewStudent, Student, StudentPatch, StudentStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_field_error;

/// University reference inside a student body.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct UniversityRefBody {
    #[schema(example = 1)]
    pub id: i64,
}

/// Request body for `POST /api/students`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[schema(example = "Emily")]
    pub first_name: String,
    #[schema(example = "Martinez")]
    pub last_name: String,
    #[schema(example = "emily.martinez@philosophe.edu")]
    pub email: String,
    pub university: UniversityRefBody,
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = Error;

    fn try_from(value: CreateStudentRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            &value.first_name,
            &value.last_name,
            &value.email,
            value.university.id,
        )
        .map_err(map_field_error)
    }
}

/// Request body for `PUT /api/students/{id}`; absent fields keep their values.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub university: Option<UniversityRefBody>,
}

impl TryFrom<UpdateStudentRequest> for StudentPatch {
    type Error = Error;

    fn try_from(value: UpdateStudentRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.first_name.as_deref(),
            value.last_name.as_deref(),
            value.email.as_deref(),
            value.university.map(|university| university.id),
        )
        .map_err(map_field_error)
    }
}

/// Query string for student search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentSearchQuery {
    /// Fragment matched case-insensitively against names and email.
    pub query: String,
}

/// List all students.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students", body = [Student]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["students"],
    operation_id = "listStudents",
    security([])
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    Ok(web::Json(state.students.list_students().await?))
}

/// Case-insensitive search over first name, last name and email.
#[utoipa::path(
    get,
    path = "/api/students/search",
    params(StudentSearchQuery),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 400, description = "Missing query", body = Error)
    ),
    tags = ["students"],
    operation_id = "searchStudents",
    security([])
)]
#[get("/students/search")]
pub async fn search_students(
    state: web::Data<HttpState>,
    query: web::Query<StudentSearchQuery>,
) -> ApiResult<web::Json<Vec<Student>>> {
    Ok(web::Json(state.students.search_students(&query.query).await?))
}

/// Student counters.
#[utoipa::path(
    get,
    path = "/api/students/stats",
    responses((status = 200, description = "Student statistics", body = StudentStats)),
    tags = ["students"],
    operation_id = "studentStats",
    security([])
)]
#[get("/students/stats")]
pub async fn student_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<StudentStats>> {
    Ok(web::Json(state.students.student_stats().await?))
}

/// Students belonging to one university; empty for an unknown id.
#[utoipa::path(
    get,
    path = "/api/students/university/{id}",
    params(("id" = i64, Path, description = "University identifier")),
    responses(
        (status = 200, description = "Students of the university", body = [Student])
    ),
    tags = ["students"],
    operation_id = "studentsByUniversity",
    security([])
)]
#[get("/students/university/{id}")]
pub async fn students_by_university(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Student>>> {
    Ok(web::Json(
        state
            .students
            .students_by_university(path.into_inner())
            .await?,
    ))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["students"],
    operation_id = "getStudent",
    security([])
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Student>> {
    Ok(web::Json(state.students.get_student(path.into_inner()).await?))
}

/// Create a student under an existing university.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Created", body = Student),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown university", body = Error),
        (status = 409, description = "Email already exists", body = Error)
    ),
    tags = ["students"],
    operation_id = "createStudent",
    security([])
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewStudent::try_from(payload.into_inner())?;
    let created = state.students.create_student(&draft).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update a student; absent fields keep their stored values.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated", body = Student),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Email already exists", body = Error)
    ),
    tags = ["students"],
    operation_id = "updateStudent",
    security([])
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateStudentRequest>,
) -> ApiResult<web::Json<Student>> {
    let patch = StudentPatch::try_from(payload.into_inner())?;
    Ok(web::Json(
        state
            .students
            .update_student(path.into_inner(), &patch)
            .await?,
    ))
}

/// Delete a student.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["students"],
    operation_id = "deleteStudent",
    security([])
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.students.delete_student(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the student routes; literal segments precede `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_students)
        .service(search_students)
        .service(student_stats)
        .service(students_by_university)
        .service(get_student)
        .service(create_student)
        .service(update_student)
        .service(delete_student);
}
