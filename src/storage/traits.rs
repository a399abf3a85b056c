use serde::{Deserialize, Serialize};

use super::error::Result;

pub type StudentId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    pub mobile: String,
}

impl From<Student> for (StudentId, String, String, String) {
    fn from(s: Student) -> Self {
        (s.id, s.name, s.course, s.mobile)
    }
}

/// The mutable part of a record, as supplied on insert and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub course: String,
    pub mobile: String,
}

impl StudentFields {
    pub fn new(
        name: impl Into<String>,
        course: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            course: course.into(),
            mobile: mobile.into(),
        }
    }
}

/// Data access for the `students` table.
///
/// Every call acquires its own connection, runs a single statement and
/// releases the connection before returning, success or not.
pub trait StudentRepository {
    /// All records in the store's natural order.
    fn list(&self) -> Result<Vec<Student>>;

    /// Insert a record and return the id the store assigned to it.
    fn insert(&self, fields: &StudentFields) -> Result<StudentId>;

    /// Overwrite the mutable fields of `id`. Returns the number of affected
    /// rows; an unknown id affects zero rows and is not an error.
    fn update(&self, id: StudentId, fields: &StudentFields) -> Result<usize>;

    /// Remove `id`. Same zero-rows semantics as [`StudentRepository::update`].
    fn delete(&self, id: StudentId) -> Result<usize>;

    /// Records whose name equals `name` exactly.
    fn search_by_name(&self, name: &str) -> Result<Vec<Student>>;
}
