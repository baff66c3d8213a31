//! Key command - print the primary cache key for the current project

use crate::cli::args::KeyArgs;
use crate::cli::commands::compute_primary_key;
use crate::config::Config;
use crate::context::RunContext;
use crate::error::RestashResult;

/// Execute the key command
pub async fn execute(args: KeyArgs, config: &Config) -> RestashResult<()> {
    let ctx = RunContext::from_env();
    let key = compute_primary_key(config, &ctx, args.scope.as_deref())?;
    println!("{}", key);
    Ok(())
}
