//! Command-line surface.
//!
//! Accepts both `-name=Ana` and `--name=Ana`; single-dash long flags are
//! rewritten to the double-dash form before `clap` sees them.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "staffbook",
    version,
    about = "Load employee records from JSON into SQLite and run CRUD commands against them",
    after_help = "Examples:\n  staffbook -command=load -file=employees.json\n  staffbook -command=get -name=Ana\n  staffbook -command=update -name=Ana -age=31 -department=Ops"
)]
pub struct CliArgs {
    /// Operation to run: load, add, get, update or delete
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub command: String,

    /// JSON file read by `load`
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub file: String,

    /// Employee name; lookup key for get, update and delete
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub name: String,

    #[arg(long, default_value_t, allow_negative_numbers = true)]
    pub age: i64,

    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub gender: String,

    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub nationality: String,

    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub email: String,

    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub department: String,

    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub reason: String,

    #[arg(long = "startDate", default_value_t, allow_hyphen_values = true)]
    pub start_date: String,

    #[arg(long = "daysOff", default_value_t, allow_negative_numbers = true)]
    pub days_off: i64,

    /// SQLite database file
    #[arg(long, env = "STAFFBOOK_DB", default_value = "staffbook.db")]
    pub db: PathBuf,

    /// Absolute directory for log files; logging is off when unset
    #[arg(long = "log-dir", env = "STAFFBOOK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long = "log-level", env = "STAFFBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parses the process arguments, exiting with usage on malformed flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_flag_prefix(std::env::args_os()))
    }

    /// Parses `args` (program name first) without exiting the process.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_flag_prefix(args))
    }
}

/// Rewrites `-flag[=value]` to `--flag[=value]`.
///
/// Short flags (`-h`), negative numbers (`-5`) and everything after a bare
/// `--` are left alone. A flag given without `=` takes the next argument as
/// its value verbatim, so `-name -Bo` sets the name to `-Bo`. The first item
/// is the program name.
pub fn normalize_flag_prefix<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut value_pending = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            if value_pending {
                value_pending = false;
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let normalized = if is_single_dash_long_flag(text) {
                format!("-{text}")
            } else {
                text.to_string()
            };
            if let Some(flag) = normalized.strip_prefix("--") {
                value_pending = !flag.contains('=') && !SWITCHES.contains(&flag);
            }
            OsString::from(normalized)
        })
        .collect()
}

/// Long flags that never take a value.
const SWITCHES: &[&str] = &["help", "version"];

fn is_single_dash_long_flag(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('-') else {
        return false;
    };
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) => first.is_ascii_alphabetic(),
        _ => false,
    }
}
