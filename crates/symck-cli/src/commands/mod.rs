pub mod attributes;
pub mod check;
pub mod demo;
pub mod load;
pub mod resolve;

use symck_config::SymckConfig;

use crate::cli::{Commands, GlobalFlags};

/// Run one command. `Ok(false)` means the command ran but its checks failed.
pub fn dispatch(
    command: &Commands,
    config: &SymckConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    match command {
        Commands::Resolve { input, type_name } => resolve::handle(input, type_name, config, flags),
        Commands::Attributes { input, type_name } => {
            attributes::handle(input, type_name, config, flags)
        }
        Commands::Check {
            input,
            target,
            candidates,
            expected_args,
        } => check::handle(input, target, candidates, *expected_args, config, flags),
        Commands::Demo => demo::handle(config, flags),
    }
}
