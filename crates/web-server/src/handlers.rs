use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use core_types::{Student, StudentPayload};

use crate::{error::AppError, extract::ValidatedJson, AppState};

type StudentId = WithRejection<Path<i64>, AppError>;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Student {id} not found"))
}

/// # GET /api/student
/// Lists every student, ordered by id.
#[utoipa::path(
    get,
    path = "/api/student",
    tag = "Student",
    responses(
        (status = 200, description = "All students", body = [Student]),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    )
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.students.get_all().await?;
    Ok(Json(students))
}

/// # POST /api/student
#[utoipa::path(
    post,
    path = "/api/student",
    tag = "Student",
    request_body = StudentPayload,
    responses(
        (status = 200, description = "The stored student with its new id", body = Student),
        (status = 400, description = "Malformed body or failed field rules", body = crate::error::ValidationErrorBody),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    )
)]
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<StudentPayload>,
) -> Result<Json<Student>, AppError> {
    let student = state.students.create(payload).await?;
    tracing::info!(id = student.id, "Student created.");
    Ok(Json(student))
}

/// # GET /api/student/:id
#[utoipa::path(
    get,
    path = "/api/student/{id}",
    tag = "Student",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No student with this id", body = crate::error::ErrorBody)
    )
)]
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): StudentId,
) -> Result<Json<Student>, AppError> {
    let student = state
        .students
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(student))
}

/// # PUT /api/student/:id
/// Replaces every field of an existing student.
#[utoipa::path(
    put,
    path = "/api/student/{id}",
    tag = "Student",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "The updated student", body = Student),
        (status = 400, description = "Malformed body or failed field rules", body = crate::error::ValidationErrorBody),
        (status = 404, description = "No student with this id", body = crate::error::ErrorBody)
    )
)]
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): StudentId,
    ValidatedJson(payload): ValidatedJson<StudentPayload>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .students
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Student updated.");
    Ok(Json(student))
}

/// # DELETE /api/student/:id
#[utoipa::path(
    delete,
    path = "/api/student/{id}",
    tag = "Student",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student removed"),
        (status = 404, description = "No student with this id", body = crate::error::ErrorBody)
    )
)]
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): StudentId,
) -> Result<StatusCode, AppError> {
    if !state.students.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Student deleted.");
    Ok(StatusCode::NO_CONTENT)
}
