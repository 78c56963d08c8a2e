//! Command-line front end for the staffbook employee store.

pub mod args;
pub mod dispatch;

pub use args::{normalize_flag_prefix, CliArgs};
pub use dispatch::{dispatch, employee_from_args, Command, CommandError, Outcome, USAGE_HINT};
