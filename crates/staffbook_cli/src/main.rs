//! `staffbook` executable.
//!
//! # Responsibility
//! - Parse flags, start optional file logging, open the database.
//! - Run exactly one command and exit.
//!
//! # Invariants
//! - Exit code is non-zero only when setup fails before a command runs.

use log::{debug, error};
use staffbook_cli::{dispatch, CliArgs};
use staffbook_core::{default_log_level, init_logging, open_db, SqliteEmployeeRepository};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse_normalized();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("failed to initialize logging: {err}");
            return ExitCode::FAILURE;
        }
    }
    debug!(
        "event=cli_start module=cli status=ok core_version={}",
        staffbook_core::core_version()
    );

    let mut conn = match open_db(&args.db) {
        Ok(conn) => conn,
        Err(err) if err.is_schema_setup() => {
            println!("failed to create table: {err}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            println!("failed to connect database: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("connected to the database");
    println!("table created successfully");

    let mut repo = SqliteEmployeeRepository::new(&mut conn);
    let mut stdout = io::stdout().lock();
    if let Err(err) = dispatch(&mut repo, &args, &mut stdout) {
        error!("event=command module=cli status=error error_code=output_failed error={err}");
        eprintln!("failed to write output: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
