//! CLI module for shapeguard
//!
//! Provides command-line interface for:
//! - demo: exclusion-at-serialization versus schema projection
//! - project: print a projected schema
//! - instantiate: validate a record from stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ProjectionArgs};
pub use commands::{
    choose_policy, demo, demo_user_schema, instantiate, instantiate_with, project, project_to, run_command,
};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_request_from, write_error_to, write_response_to};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
