//! Single-command dispatcher.
//!
//! # Responsibility
//! - Map the `--command` selector to exactly one repository operation.
//! - Render the outcome as human-readable lines on the output sink.
//!
//! # Invariants
//! - Business failures are reported as text; only output I/O errors
//!   propagate to the caller.
//! - Not-found outcomes are reported distinctly from storage failures.
//! - An unknown command prints the usage hint and performs no storage I/O.

use crate::args::CliArgs;
use log::{info, warn};
use staffbook_core::{load_file, Employee, EmployeeRepository, LoadError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

pub const USAGE_HINT: &str = "Invalid command. Please choose: load, add, get, update, delete";

/// Operation selected by `--command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Load,
    Add,
    Get,
    Update,
    Delete,
}

impl Command {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "load" => Some(Self::Load),
            "add" => Some(Self::Add),
            "get" => Some(Self::Get),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Add => "add",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// What happened to the selected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    NotFound,
    Failed,
    /// No known command was selected; the usage hint was printed.
    Usage,
}

/// Failure of a single command.
#[derive(Debug)]
pub enum CommandError {
    Load(LoadError),
    Repo(RepoError),
}

impl CommandError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Repo(err) => err.is_not_found(),
            Self::Load(_) => false,
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<LoadError> for CommandError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Builds the employee described by the field flags.
///
/// Omitted flags contribute their zero/empty defaults.
pub fn employee_from_args(args: &CliArgs) -> Employee {
    Employee {
        name: args.name.clone(),
        age: args.age,
        gender: args.gender.clone(),
        nationality: args.nationality.clone(),
        email: args.email.clone(),
        department: args.department.clone(),
        reason: args.reason.clone(),
        start_date: args.start_date.clone(),
        days_off: args.days_off,
    }
}

/// Runs the command selected in `args` against `repo`, writing the result to `out`.
pub fn dispatch<R, W>(repo: &mut R, args: &CliArgs, out: &mut W) -> io::Result<Outcome>
where
    R: EmployeeRepository + ?Sized,
    W: Write,
{
    let Some(command) = Command::parse(args.command.as_str()) else {
        warn!("event=command module=cli status=unknown");
        writeln!(out, "{USAGE_HINT}")?;
        return Ok(Outcome::Usage);
    };

    info!(
        "event=command module=cli status=start command={}",
        command.as_str()
    );

    let outcome = match command {
        Command::Load => report(
            out,
            run_load(repo, args),
            "load data successfully",
            "failed to load data",
        )?,
        Command::Add => report(
            out,
            run_add(&*repo, args),
            "add employee successfully",
            "failed to add employee",
        )?,
        Command::Get => match run_get(&*repo, args) {
            Ok(employee) => {
                write_employee(out, &employee)?;
                Outcome::Succeeded
            }
            Err(err) => report_failure(out, "failed to read employee", &err)?,
        },
        Command::Update => report(
            out,
            run_update(&*repo, args),
            "update employee successfully",
            "failed to update employee",
        )?,
        Command::Delete => report(
            out,
            run_delete(&*repo, args),
            "delete employee successfully",
            "failed to delete employee",
        )?,
    };

    info!(
        "event=command module=cli status={} command={}",
        outcome_status(outcome),
        command.as_str()
    );
    Ok(outcome)
}

fn run_load<R>(repo: &mut R, args: &CliArgs) -> Result<usize, CommandError>
where
    R: EmployeeRepository + ?Sized,
{
    Ok(load_file(repo, args.file.as_str())?)
}

fn run_add<R>(repo: &R, args: &CliArgs) -> Result<(), CommandError>
where
    R: EmployeeRepository + ?Sized,
{
    repo.add(&employee_from_args(args))?;
    Ok(())
}

fn run_get<R>(repo: &R, args: &CliArgs) -> Result<Employee, CommandError>
where
    R: EmployeeRepository + ?Sized,
{
    Ok(repo.find_by_name(args.name.as_str())?)
}

fn run_update<R>(repo: &R, args: &CliArgs) -> Result<(), CommandError>
where
    R: EmployeeRepository + ?Sized,
{
    let mut employee = repo.find_by_name(args.name.as_str())?;
    employee.overwrite_fields_from(&employee_from_args(args));
    repo.update_by_name(&employee)?;
    Ok(())
}

fn run_delete<R>(repo: &R, args: &CliArgs) -> Result<(), CommandError>
where
    R: EmployeeRepository + ?Sized,
{
    repo.delete_by_name(args.name.as_str())?;
    Ok(())
}

fn report<T, W: Write>(
    out: &mut W,
    result: Result<T, CommandError>,
    success: &str,
    failure_prefix: &str,
) -> io::Result<Outcome> {
    match result {
        Ok(_) => {
            writeln!(out, "{success}")?;
            Ok(Outcome::Succeeded)
        }
        Err(err) => report_failure(out, failure_prefix, &err),
    }
}

fn report_failure<W: Write>(
    out: &mut W,
    prefix: &str,
    err: &CommandError,
) -> io::Result<Outcome> {
    writeln!(out, "{prefix}: {err}")?;
    if err.is_not_found() {
        Ok(Outcome::NotFound)
    } else {
        Ok(Outcome::Failed)
    }
}

fn write_employee<W: Write>(out: &mut W, employee: &Employee) -> io::Result<()> {
    writeln!(out, "Employee Details:")?;
    writeln!(out, "Name: {}", employee.name)?;
    writeln!(out, "Age: {}", employee.age)?;
    writeln!(out, "Gender: {}", employee.gender)?;
    writeln!(out, "Nationality: {}", employee.nationality)?;
    writeln!(out, "Email: {}", employee.email)?;
    writeln!(out, "Department: {}", employee.department)?;
    writeln!(out, "Reason: {}", employee.reason)?;
    writeln!(out, "StartDate: {}", employee.start_date)?;
    writeln!(out, "DaysOff: {}", employee.days_off)?;
    Ok(())
}

fn outcome_status(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Succeeded => "ok",
        Outcome::NotFound => "not_found",
        Outcome::Failed => "error",
        Outcome::Usage => "usage",
    }
}
