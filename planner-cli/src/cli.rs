//! Argument definitions

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(version)]
#[command(about = "Track users, teams, project boards and tasks")]
#[command(long_about = "
Track users, teams, project boards and tasks in JSON files.

Run an operation as `planner <noun> <verb> [REQUEST]`, where REQUEST is a JSON
object (default `{}`, or `-` to read it from stdin):

  planner user create '{\"name\": \"ana\", \"display_name\": \"Ana\"}'
  planner team create '{\"name\": \"core\", \"description\": \"Core\", \"admin\": \"user_1\"}'
  planner task status '{\"id\": \"task_1\", \"status\": \"COMPLETE\"}'

`planner ops` lists every operation with its parameters.
")]
pub struct Cli {
    /// Directory holding the collection files
    #[arg(long, global = true, value_name = "DIR")]
    pub db_dir: Option<PathBuf>,

    /// Directory exported reports are written to
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Name recorded as the actor in the activity log
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Enable trace logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every operation and its parameters
    Ops,

    /// Show the activity log, newest first
    Activity {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// <noun> <verb> [REQUEST]
    #[command(external_subcommand)]
    Run(Vec<String>),
}

/// Where the JSON request comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    Inline(String),
    Stdin,
}

/// A parsed `<noun> <verb> [REQUEST]` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub noun: String,
    pub verb: String,
    pub request: RequestSource,
}

impl Invocation {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let (noun, verb, request) = match args {
            [noun, verb] => (noun, verb, RequestSource::Inline("{}".to_string())),
            [noun, verb, request] if request == "-" => (noun, verb, RequestSource::Stdin),
            [noun, verb, request] => (noun, verb, RequestSource::Inline(request.clone())),
            [_] | [] => bail!("expected <noun> <verb> [REQUEST]"),
            _ => bail!("unexpected arguments after REQUEST: {}", args[3..].join(" ")),
        };
        Ok(Self {
            noun: noun.clone(),
            verb: verb.clone(),
            request,
        })
    }

    /// Canonical op string, e.g. "create user"
    pub fn op_string(&self) -> String {
        format!("{} {}", self.verb, self.noun)
    }
}
