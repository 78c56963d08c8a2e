//! Bulk load of employee records from a JSON file.
//!
//! # Responsibility
//! - Read and decode a JSON array of employees.
//! - Hand the decoded records to `EmployeeRepository::load_all`.
//!
//! # Invariants
//! - Nothing touches storage unless the whole file decoded successfully.

use crate::model::employee::Employee;
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Failure while loading an employee file.
#[derive(Debug)]
pub enum LoadError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Repo(RepoError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read JSON file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse JSON file `{}`: {source}", path.display())
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for LoadError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Reads `path` and decodes it as a JSON array of employees.
pub fn read_employees(path: impl AsRef<Path>) -> Result<Vec<Employee>, LoadError> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the repository contents with the records in `path`.
///
/// Returns the number of records loaded.
pub fn load_file<R>(repo: &mut R, path: impl AsRef<Path>) -> Result<usize, LoadError>
where
    R: EmployeeRepository + ?Sized,
{
    let employees = match read_employees(path) {
        Ok(employees) => employees,
        Err(err) => {
            error!("event=employees_load module=loader status=error error={err}");
            return Err(err);
        }
    };

    repo.load_all(&employees)?;
    info!(
        "event=employees_load module=loader status=ok count={}",
        employees.len()
    );
    Ok(employees.len())
}
