use thiserror::Error;

use crate::storage::{Student, StudentFields, StudentId, StudentRepository, StorageError};

pub const ABOUT: &str =
    "This app allows user to manage student data by adding, updating, deleting functionality.";

/// A message shown to the user once an action completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    const fn success(message: &'static str) -> Self {
        Self {
            title: "Success",
            message,
        }
    }
}

pub const ADDED: Notice = Notice::success("New student has been added successfully!");
pub const UPDATED: Notice = Notice::success("Student data has been updated successfully!");
pub const DELETED: Notice = Notice::success("Student data has been deleted successfully!");
pub const NO_RECORDS: Notice = Notice {
    title: "No Records",
    message: "No matching records found!",
};

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("no student record is selected")]
    NoSelection,

    #[error("student {0} is not in the current table")]
    UnknownRecord(StudentId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, PresenterError>;

type RefreshFn<'a> = Box<dyn FnMut(&[Student]) + 'a>;

/// Holds what the user is looking at and drives the repository.
///
/// Views register refresh callbacks with [`Presenter::on_refresh`] and get the
/// freshly listed rows after every load and every mutating action.
pub struct Presenter<'a, R: StudentRepository> {
    repo: R,
    rows: Vec<Student>,
    selected: Option<StudentId>,
    observers: Vec<RefreshFn<'a>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub matches: Vec<Student>,
    pub notice: Option<Notice>,
}

impl<'a, R: StudentRepository> Presenter<'a, R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            rows: Vec::new(),
            selected: None,
            observers: Vec::new(),
        }
    }

    pub fn on_refresh<F>(&mut self, callback: F)
    where
        F: FnMut(&[Student]) + 'a,
    {
        self.observers.push(Box::new(callback));
    }

    pub fn rows(&self) -> &[Student] {
        &self.rows
    }

    pub fn load(&mut self) -> Result<()> {
        self.rows = self.repo.list()?;
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|s| s.id == id) {
                self.selected = None;
            }
        }
        for observer in self.observers.iter_mut() {
            observer(&self.rows);
        }
        Ok(())
    }

    pub fn select(&mut self, id: StudentId) -> Result<&Student> {
        let student = self
            .rows
            .iter()
            .find(|s| s.id == id)
            .ok_or(PresenterError::UnknownRecord(id))?;
        self.selected = Some(id);
        Ok(student)
    }

    pub fn selected(&self) -> Option<&Student> {
        let id = self.selected?;
        self.rows.iter().find(|s| s.id == id)
    }

    pub fn add(&mut self, fields: &StudentFields) -> Result<Notice> {
        let id = self.repo.insert(fields)?;
        log::info!("Added student {}", id);
        self.load()?;
        Ok(ADDED)
    }

    pub fn edit_selected(&mut self, fields: &StudentFields) -> Result<Notice> {
        let id = self.selected.ok_or(PresenterError::NoSelection)?;
        let affected = self.repo.update(id, fields)?;
        log::info!("Updated student {} ({} rows)", id, affected);
        self.load()?;
        Ok(UPDATED)
    }

    pub fn delete_selected(&mut self) -> Result<Notice> {
        let id = self.selected.take().ok_or(PresenterError::NoSelection)?;
        let affected = self.repo.delete(id)?;
        log::info!("Deleted student {} ({} rows)", id, affected);
        self.load()?;
        Ok(DELETED)
    }

    pub fn search(&self, name: &str) -> Result<SearchResult> {
        let matches = self.repo.search_by_name(name)?;
        let notice = matches.is_empty().then_some(NO_RECORDS);
        Ok(SearchResult { matches, notice })
    }

    pub fn about(&self) -> Notice {
        Notice {
            title: "About",
            message: ABOUT,
        }
    }
}
