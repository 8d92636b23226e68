//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`validate`], [`health`], or [`probe`].
//! Each handler lives in its own submodule.

mod client;
pub mod health;
pub mod probe;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::CorrelationError;

pub async fn dispatch(cli: Cli) -> Result<(), CorrelationError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        Some(Commands::Probe(args)) => probe::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  correlation-id v{version} \u{2014} correlation id propagation for HTTP services\n\n  \
         No command provided. To get started:\n\n    \
         correlation-id run                    Start the server on :3000\n    \
         correlation-id probe                  Check propagation on a running instance\n    \
         correlation-id --help                 See all commands and options\n"
    );
}
