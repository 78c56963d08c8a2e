//! Core storage and domain logic for staffbook.
//! The repository here is the only code that talks to the employee table.

pub mod db;
pub mod loader;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use loader::{load_file, read_employees, LoadError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::Employee;
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
