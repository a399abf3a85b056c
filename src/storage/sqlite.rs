use rusqlite::{params, Connection};

use super::{
    connection::{ConnectionProvider, SqliteConnectionProvider, StoreConfig},
    error::{Result, StorageError},
    traits::{Student, StudentFields, StudentId, StudentRepository},
};

#[derive(Clone, Debug)]
pub struct SqliteStudentRepository<P = SqliteConnectionProvider> {
    provider: P,
}

fn map_student_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        course: row.get(2)?,
        mobile: row.get(3)?,
    })
}

fn db_list_students(conn: &Connection) -> rusqlite::Result<Vec<Student>> {
    let mut stmt = conn.prepare("SELECT id, name, course, mobile FROM students")?;
    let rows = stmt
        .query_map([], map_student_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_search_students(conn: &Connection, name: &str) -> rusqlite::Result<Vec<Student>> {
    let mut stmt = conn.prepare("SELECT id, name, course, mobile FROM students WHERE name = ?1")?;
    let rows = stmt
        .query_map(params![name], map_student_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_insert_student(conn: &Connection, fields: &StudentFields) -> rusqlite::Result<StudentId> {
    conn.execute(
        "INSERT INTO students (name, course, mobile) VALUES (?1, ?2, ?3)",
        params![fields.name, fields.course, fields.mobile],
    )?;
    Ok(conn.last_insert_rowid())
}

fn db_update_student(
    conn: &Connection,
    id: StudentId,
    fields: &StudentFields,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE students SET name = ?1, course = ?2, mobile = ?3 WHERE id = ?4",
        params![fields.name, fields.course, fields.mobile, id],
    )
}

fn db_delete_student(conn: &Connection, id: StudentId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM students WHERE id = ?1", params![id])
}

impl SqliteStudentRepository {
    pub fn open(config: StoreConfig) -> Self {
        Self::with_provider(SqliteConnectionProvider::new(config))
    }
}

impl<P: ConnectionProvider> SqliteStudentRepository<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run `f` on a fresh connection. The connection is dropped when this
    /// returns, whichever way `f` exits. Autocommit mode makes each mutating
    /// statement its own committed transaction.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.provider.connect()?;
        f(&conn).map_err(StorageError::Constraint)
    }
}

impl<P: ConnectionProvider> StudentRepository for SqliteStudentRepository<P> {
    fn list(&self) -> Result<Vec<Student>> {
        let rows = self.with_conn(db_list_students)?;
        log::debug!("listed {} students", rows.len());
        Ok(rows)
    }

    fn insert(&self, fields: &StudentFields) -> Result<StudentId> {
        let id = self.with_conn(|conn| db_insert_student(conn, fields))?;
        log::debug!("inserted student {}", id);
        Ok(id)
    }

    fn update(&self, id: StudentId, fields: &StudentFields) -> Result<usize> {
        let affected = self.with_conn(|conn| db_update_student(conn, id, fields))?;
        log::debug!("updated student {} ({} rows)", id, affected);
        Ok(affected)
    }

    fn delete(&self, id: StudentId) -> Result<usize> {
        let affected = self.with_conn(|conn| db_delete_student(conn, id))?;
        log::debug!("deleted student {} ({} rows)", id, affected);
        Ok(affected)
    }

    fn search_by_name(&self, name: &str) -> Result<Vec<Student>> {
        let rows = self.with_conn(|conn| db_search_students(conn, name))?;
        log::debug!("search {:?} matched {} students", name, rows.len());
        Ok(rows)
    }
}
