//! services/api/src/web/students.rs
//!
//! Axum handlers for the student registry: CRUD, bulk migration from the
//! old localStorage export, and the synthesized dashboard statistics.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::web::envelope::{fail, port_failure, Envelope, Failure};
use crate::web::state::AppState;

/// Bulk-import body: the old front-end posts `{"students": [...]}`.
#[derive(serde::Deserialize, ToSchema)]
pub struct MigrateRequest {
    #[schema(value_type = Object)]
    pub students: Option<Value>,
}

/// List every student.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All student records with a count"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let students = state
        .students
        .list()
        .await
        .map_err(|e| port_failure(e, "Failed to retrieve students"))?;
    let count = students.len();
    Ok(Json(Envelope::data(students).with_count(count)))
}

/// Fetch one student by id.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id in YYMMnnnn form")),
    responses(
        (status = 200, description = "The student record"),
        (status = 404, description = "Unknown student id")
    )
)]
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let student = state
        .students
        .get(&id)
        .await
        .map_err(|e| port_failure(e, "Failed to retrieve student"))?;
    Ok(Json(Envelope::data(student)))
}

/// Create a student; the id is generated server-side.
#[utoipa::path(
    post,
    path = "/api/students",
    responses(
        (status = 201, description = "Student created with a fresh YYMMnnnn id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Envelope<impl serde::Serialize>>), Failure> {
    let student = state
        .students
        .create(fields)
        .await
        .map_err(|e| port_failure(e, "Failed to create student"))?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(student).with_message("Student created successfully")),
    ))
}

/// Bulk-import student records, deduplicating by email.
#[utoipa::path(
    post,
    path = "/api/students/migrate",
    request_body = MigrateRequest,
    responses(
        (status = 200, description = "Migration summary"),
        (status = 400, description = "Body's students field is not an array")
    )
)]
pub async fn migrate_students(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MigrateRequest>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let records: Vec<Map<String, Value>> = match body.students {
        Some(value @ Value::Array(_)) => serde_json::from_value(value)
            .map_err(|_| fail(StatusCode::BAD_REQUEST, "Students must be an array"))?,
        _ => return Err(fail(StatusCode::BAD_REQUEST, "Students must be an array")),
    };

    let summary = state
        .students
        .migrate(records)
        .await
        .map_err(|e| port_failure(e, "Failed to save migrated students"))?;
    let message = format!("Migrated {} students successfully", summary.migrated_count);
    Ok(Json(Envelope::data(summary).with_message(message)))
}

/// Partial update; the id itself is immutable.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "The updated record"),
        (status = 404, description = "Unknown student id")
    )
)]
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let student = state
        .students
        .update(&id, fields)
        .await
        .map_err(|e| port_failure(e, "Failed to update student"))?;
    Ok(Json(
        Envelope::data(student).with_message("Student updated successfully"),
    ))
}

/// Remove a student, returning the deleted record.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "The deleted record"),
        (status = 404, description = "Unknown student id")
    )
)]
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let student = state
        .students
        .delete(&id)
        .await
        .map_err(|e| port_failure(e, "Failed to delete student"))?;
    Ok(Json(
        Envelope::data(student).with_message("Student deleted successfully"),
    ))
}

/// Dashboard numbers derived from the current student count.
#[utoipa::path(
    get,
    path = "/api/students/stats/dashboard",
    responses(
        (status = 200, description = "Synthesized dashboard statistics"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let stats = state
        .students
        .dashboard_stats()
        .await
        .map_err(|e| port_failure(e, "Failed to calculate statistics"))?;
    Ok(Json(Envelope::data(stats)))
}
