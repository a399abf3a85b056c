use std::cell::RefCell;
use std::io::Write;

use anyhow::{bail, Context as _, Result};
use comfy_table::Table;

use crate::cli::Command;
use crate::presenter::{Notice, Presenter};
use crate::storage::{Student, StudentFields, StudentRepository};

pub fn render_table(rows: &[Student]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Course", "Mobile"]);
    for s in rows {
        table.add_row(vec![
            s.id.to_string(),
            s.name.clone(),
            s.course.clone(),
            s.mobile.clone(),
        ]);
    }
    table.to_string()
}

/// Run a one-shot command. The refreshed table is written first, then the
/// notice for the action.
pub fn run<R: StudentRepository>(cmd: &Command, repo: R, out: &mut impl Write) -> Result<()> {
    let refreshed = RefCell::new(None::<String>);
    let mut presenter = Presenter::new(repo);
    presenter.on_refresh(|rows| *refreshed.borrow_mut() = Some(render_table(rows)));

    let mut matches = None;
    let notice: Option<Notice> = match cmd {
        Command::List => {
            presenter.load().context("loading students")?;
            log::debug!("{} students loaded", presenter.rows().len());
            None
        }
        Command::Add {
            name,
            course,
            mobile,
        } => {
            let fields = StudentFields::new(name.as_str(), course.as_str(), mobile.as_str());
            Some(presenter.add(&fields).context("adding student")?)
        }
        Command::Search { name } => {
            let result = presenter.search(name).context("searching students")?;
            if !result.matches.is_empty() {
                matches = Some(render_table(&result.matches));
            }
            result.notice
        }
        Command::Edit {
            id,
            name,
            course,
            mobile,
        } => {
            presenter.load().context("loading students")?;
            let current = presenter.select(*id)?;
            log::debug!("Editing student {} ({})", current.id, current.name);
            let fields = StudentFields::new(
                name.clone().unwrap_or_else(|| current.name.clone()),
                course.map_or_else(|| current.course.clone(), |c| c.to_string()),
                mobile.clone().unwrap_or_else(|| current.mobile.clone()),
            );
            Some(presenter.edit_selected(&fields).context("updating student")?)
        }
        Command::Delete { id, yes } => {
            presenter.load().context("loading students")?;
            presenter.select(*id)?;
            if !*yes {
                bail!("refusing to delete student {} without --yes", id);
            }
            if let Some(current) = presenter.selected() {
                log::debug!("Deleting student {} ({})", current.id, current.name);
            }
            Some(presenter.delete_selected().context("deleting student")?)
        }
        Command::About => Some(presenter.about()),
        Command::Serve { .. } => bail!("serve is not a one-shot command"),
    };
    drop(presenter);

    if let Some(table) = refreshed.into_inner().or(matches) {
        writeln!(out, "{}", table)?;
    }
    if let Some(notice) = notice {
        writeln!(out, "{}: {}", notice.title, notice.message)?;
    }
    Ok(())
}
