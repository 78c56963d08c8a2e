//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate the five employee operations into single-table SQL.
//! - Map storage outcomes to semantic errors (`NotFound`) vs driver errors.
//!
//! # Invariants
//! - `load_all` replaces the table inside one transaction; a failed insert
//!   leaves prior contents intact.
//! - Update/delete inspect the affected-row count; zero rows is `NotFound`.
//! - `name` is unique, so by-name operations touch at most one row.

use crate::db::DbError;
use crate::model::employee::Employee;
use log::{debug, info, warn};
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    name,
    age,
    gender,
    nationality,
    email,
    department,
    reason,
    start_date,
    days_off
FROM employees";

const EMPLOYEE_INSERT_SQL: &str = "INSERT INTO employees (
    name,
    age,
    gender,
    nationality,
    email,
    department,
    reason,
    start_date,
    days_off
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    /// Driver or schema failure, including constraint violations.
    Db(DbError),
    /// No row matches the given name.
    NotFound(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "employee not found: {name}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for employee records.
pub trait EmployeeRepository {
    /// Replaces the whole table with `records`.
    fn load_all(&mut self, records: &[Employee]) -> RepoResult<()>;
    fn add(&self, record: &Employee) -> RepoResult<()>;
    fn find_by_name(&self, name: &str) -> RepoResult<Employee>;
    /// Overwrites every column of the row matching `record.name`.
    fn update_by_name(&self, record: &Employee) -> RepoResult<()>;
    fn delete_by_name(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn load_all(&mut self, records: &[Employee]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let removed = tx.execute("DELETE FROM employees;", [])?;
        {
            let mut stmt = tx.prepare(EMPLOYEE_INSERT_SQL)?;
            for record in records {
                stmt.execute(&employee_params(record))?;
            }
        }
        tx.commit()?;

        info!(
            "event=employees_load module=repo status=ok removed={} inserted={}",
            removed,
            records.len()
        );
        Ok(())
    }

    fn add(&self, record: &Employee) -> RepoResult<()> {
        self.conn.execute(EMPLOYEE_INSERT_SQL, &employee_params(record))?;
        debug!("event=employee_add module=repo status=ok");
        Ok(())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Employee> {
        let found = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE name = ?1 LIMIT 1;"),
                [name],
                parse_employee_row,
            )
            .optional()?;

        found.ok_or_else(|| RepoError::NotFound(name.to_string()))
    }

    fn update_by_name(&self, record: &Employee) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                age = ?2,
                gender = ?3,
                nationality = ?4,
                email = ?5,
                department = ?6,
                reason = ?7,
                start_date = ?8,
                days_off = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE name = ?1;",
            &employee_params(record),
        )?;

        if changed == 0 {
            warn!("event=employee_update module=repo status=not_found");
            return Err(RepoError::NotFound(record.name.clone()));
        }

        Ok(())
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM employees WHERE name = ?1;", [name])?;

        if changed == 0 {
            warn!("event=employee_delete module=repo status=not_found");
            return Err(RepoError::NotFound(name.to_string()));
        }

        Ok(())
    }
}

/// Bind order shared by insert and update: name first, then the payload.
fn employee_params(record: &Employee) -> [&dyn ToSql; 9] {
    [
        &record.name,
        &record.age,
        &record.gender,
        &record.nationality,
        &record.email,
        &record.department,
        &record.reason,
        &record.start_date,
        &record.days_off,
    ]
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        name: row.get("name")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        nationality: row.get("nationality")?,
        email: row.get("email")?,
        department: row.get("department")?,
        reason: row.get("reason")?,
        start_date: row.get("start_date")?,
        days_off: row.get("days_off")?,
    })
}
