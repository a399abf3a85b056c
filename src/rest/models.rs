use serde::{Deserialize, Serialize};

use crate::storage::{Student, StudentId};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct StudentsResponse {
    pub students: Vec<Student>,
}

#[derive(Serialize, Deserialize)]
pub struct StudentRequest {
    pub name: String,
    pub course: String,
    pub mobile: String,
}

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct InsertResponse {
    pub id: StudentId,
}

#[derive(Serialize, Deserialize)]
pub struct AffectedResponse {
    pub affected: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
