pub mod connection;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use connection::StoreConfig;
pub use error::StorageError;
pub use sqlite::SqliteStudentRepository;
pub use traits::{Student, StudentFields, StudentId, StudentRepository};
