//! Command execution

use crate::cli::{Cli, Commands, Invocation, RequestSource};
use crate::exit_codes::{self, EXIT_SUCCESS};
use anyhow::{Context, Result};
use planner::{
    operations, parse_operation, OperationProcessor, PlannerContext, PlannerOperationProcessor,
};
use planner_config::PlannerConfig;
use serde_json::{json, Value};
use std::io::Read;
use tracing::debug;

/// Run the parsed command line, print the result and return the exit code
pub async fn run(cli: Cli) -> i32 {
    match execute(cli).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{text}");
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                exit_codes::EXIT_ERROR
            }
        },
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::for_error(&e)
        }
    }
}

/// Run the parsed command line and return its JSON result
pub async fn execute(cli: Cli) -> Result<Value> {
    let config = PlannerConfig::load()?.with_overrides(cli.db_dir, cli.out_dir, cli.actor);
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Ops => Ok(describe_operations()),
        Commands::Activity { limit } => {
            let ctx = PlannerContext::open(&config).await?;
            let entries = ctx.read_activity(limit).await?;
            Ok(serde_json::to_value(entries)?)
        }
        Commands::Run(args) => {
            let invocation = Invocation::from_args(&args)?;
            let request = match invocation.request {
                RequestSource::Inline(ref text) => text.clone(),
                RequestSource::Stdin => read_stdin()?,
            };
            run_operation(&config, &invocation.op_string(), &request).await
        }
    }
}

/// Parse and run one operation against the configured store
pub async fn run_operation(config: &PlannerConfig, op: &str, request: &str) -> Result<Value> {
    let operation = parse_operation(op, request)?;
    let ctx = PlannerContext::open(config).await?;

    let processor = match &config.actor {
        Some(actor) => PlannerOperationProcessor::with_actor(actor.clone()),
        None => PlannerOperationProcessor::new(),
    };
    Ok(processor.process(operation.as_ref(), &ctx).await?)
}

fn read_stdin() -> Result<String> {
    let mut request = String::new();
    std::io::stdin()
        .read_to_string(&mut request)
        .context("failed to read request from stdin")?;
    Ok(request)
}

/// `[{op, description, parameters}]` for every operation
pub fn describe_operations() -> Value {
    let ops: Vec<Value> = operations()
        .iter()
        .map(|op| {
            json!({
                "op": op.op_string(),
                "description": op.description(),
                "parameters": op.parameters(),
            })
        })
        .collect();
    Value::Array(ops)
}
