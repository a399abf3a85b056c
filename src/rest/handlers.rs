use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    storage::{StorageError, StudentFields, StudentId, StudentRepository},
    types::Course,
};

use super::{
    models::{
        AffectedResponse, ErrorResponse, HealthResponse, InsertResponse, SearchParams,
        StudentRequest, StudentsResponse,
    },
    AppState,
};

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Extractor failures keep their status but answer with the same JSON
/// body as every other error.
fn rejected(status: StatusCode, text: String) -> Response {
    log::warn!("Rejected request: {}", text);
    error_response(status, text)
}

fn storage_error(op: &str, err: StorageError) -> Response {
    log::error!("Failed to {}: {:#}", op, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn to_fields(req: StudentRequest) -> Result<StudentFields, Response> {
    let course = req.course.parse::<Course>().map_err(|err| {
        log::warn!("Rejected student payload: {}", err);
        error_response(StatusCode::BAD_REQUEST, err.to_string())
    })?;
    Ok(StudentFields::new(req.name, course.as_str(), req.mobile))
}

pub async fn health<R: StudentRepository + Clone + Send + Sync + 'static>(
    State(state): State<AppState<R>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_students<R: StudentRepository + Clone + Send + Sync + 'static>(
    State(state): State<AppState<R>>,
) -> Response {
    match state.repo.list() {
        Ok(students) => Json(StudentsResponse { students }).into_response(),
        Err(err) => storage_error("list students", err),
    }
}

pub async fn search_students<R: StudentRepository + Clone + Send + Sync + 'static>(
    State(state): State<AppState<R>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rej) => return rejected(rej.status(), rej.body_text()),
    };
    match state.repo.search_by_name(&params.name) {
        Ok(students) => Json(StudentsResponse { students }).into_response(),
        Err(err) => storage_error("search students", err),
    }
}

pub async fn insert_student<R: StudentRepository + Clone + Send + Sync + 'static>(
    State(state): State<AppState<R>>,
    req: Result<Json<StudentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rej) => return rejected(rej.status(), rej.body_text()),
    };
    let fields = match to_fields(req) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    match state.repo.insert(&fields) {
        Ok(id) => {
            log::info!("Added student {}", id);
            (StatusCode::CREATED, Json(InsertResponse { id })).into_response()
        }
        Err(err) => storage_error("insert student", err),
    }
}

pub async fn update_student<R: StudentRepository + Clone + Send + Sync + 'static>(
    State(state): State<AppState<R>>,
    id: Result<Path<StudentId>, PathRejection>,
    req: Result<Json<StudentRequest>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rej) => return rejected(rej.status(), rej.body_text()),
    };
    let Json(req) = match req {
        Ok(req) => req,
        Err(rej) => return rejected(rej.status(), rej.body_text()),
    };
    let fields = match to_fields(req) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    match state.repo.update(id, &fields) {
        Ok(affected) => {
            log::info!("Updated student {} ({} rows)", id, affected);
            Json(AffectedResponse { affected }).into_response()
        }
        Err(err) => storage_error("update student", err),
    }
}

pub async fn delete_student<R: StudentRepository + Clone + Send + Sync + 'static>(
    State(state): State<AppState<R>>,
    id: Result<Path<StudentId>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rej) => return rejected(rej.status(), rej.body_text()),
    };
    match state.repo.delete(id) {
        Ok(affected) => {
            log::info!("Deleted student {} ({} rows)", id, affected);
            Json(AffectedResponse { affected }).into_response()
        }
        Err(err) => storage_error("delete student", err),
    }
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found")
}
