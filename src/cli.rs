// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   page-tally <SEED_URL> [--log-file <PATH>] [--json]
//
// Exactly one seed URL is accepted. The exit code says what went wrong:
//   0 = success (also --help / --version)
//   1 = more than one seed URL
//   2 = no seed URL
//   3 = anything else wrong with the arguments (unknown flag, bad value,
//       a seed that is not a usable URL)
//   4 = the crawl ran but its results could not be written
// =============================================================================

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_OK: i32 = 0;
pub const EXIT_TOO_MANY_ARGUMENTS: i32 = 1;
pub const EXIT_MISSING_ARGUMENT: i32 = 2;
pub const EXIT_BAD_ARGUMENTS: i32 = 3;
pub const EXIT_RUNTIME_FAILURE: i32 = 4;

// Raw clap view of the arguments
//
// The seed is collected as a list so that "too many" and "none" can be
// told apart and mapped to their own exit codes, instead of clap's
// generic usage error.
#[derive(Parser, Debug)]
#[command(
    name = "page-tally",
    version,
    about = "Crawl every page of one website and count how often each page is linked",
    long_about = "page-tally starts at a seed URL, follows every link that stays on the same host, \
                  and counts how many times each (normalized) page URL is reached. \
                  Results are appended to a run log."
)]
struct Args {
    /// URL to start crawling from (e.g., http://localhost:8000/)
    #[arg(value_name = "SEED_URL")]
    seed_urls: Vec<String>,

    /// File the run log is appended to
    #[arg(long, value_name = "PATH", default_value = "crawl.log")]
    log_file: PathBuf,

    /// Print the page table as JSON on stdout instead of a text table
    #[arg(long)]
    json: bool,
}

/// Validated command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub seed_url: String,
    pub log_file: PathBuf,
    pub json: bool,
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("too many arguments provided: expected one seed URL, got {0}")]
    TooManyArguments(usize),

    #[error("not enough arguments provided: expected a seed URL")]
    MissingSeed,

    #[error(transparent)]
    Clap(#[from] clap::Error),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::TooManyArguments(_) => EXIT_TOO_MANY_ARGUMENTS,
            UsageError::MissingSeed => EXIT_MISSING_ARGUMENT,
            UsageError::Clap(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_BAD_ARGUMENTS,
            },
        }
    }

    // Prints the message the way the user expects it: clap's own
    // formatting for help/version/usage, a plain line otherwise
    pub fn print(&self) {
        match self {
            UsageError::Clap(e) => {
                let _ = e.print();
            }
            other => eprintln!("Error: {}", other),
        }
    }
}

// Parses an argument vector (program name first, like std::env::args_os)
pub fn parse_args<I, T>(args: I) -> Result<Cli, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args)?;

    let count = args.seed_urls.len();
    let mut seeds = args.seed_urls.into_iter();
    match (seeds.next(), count) {
        (None, _) => Err(UsageError::MissingSeed),
        (Some(seed_url), 1) => Ok(Cli {
            seed_url,
            log_file: args.log_file,
            json: args.json,
        }),
        (Some(_), count) => Err(UsageError::TooManyArguments(count)),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why try_parse_from instead of parse?
//    - parse() prints the error and exits the process by itself
//    - try_parse_from() hands the error back, so we pick the exit code
//    - It also takes any argument list, which makes it easy to test
//
// 2. Why Vec<String> for a single URL?
//    - With a plain String, clap rejects extra arguments with its own
//      generic error, and we couldn't give "too many" its own exit code
//
// 3. What does #[from] do?
//    - thiserror generates From<clap::Error> for UsageError
//    - That's what lets the ? operator convert clap errors automatically
// -----------------------------------------------------------------------------
