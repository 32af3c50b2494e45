use salespulse_client::commands;
use salespulse_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, RulesCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Classify { input, status } => {
            commands::classify::run(&input.path, input.rules.as_deref(), status.as_deref())
        }
        Commands::Explain { input, entity_id } => {
            commands::explain::run(&input.path, entity_id, input.rules.as_deref())
        }
        Commands::Alerts { input } => commands::alerts::run(&input.path, input.rules.as_deref()),
        Commands::Summary { input } => {
            commands::summary::run(&input.path, input.rules.as_deref())
        }
        Commands::Rankings { input, limit } => {
            commands::rankings::run(&input.path, input.rules.as_deref(), *limit)
        }
        Commands::Export {
            input,
            out_dir,
            name,
            status,
        } => commands::export::run(
            &input.path,
            input.rules.as_deref(),
            out_dir.as_deref(),
            name.as_deref(),
            status.as_deref(),
        ),
        Commands::Rules { command } => match command {
            RulesCommand::Defaults { .. } => commands::rules::defaults(),
            RulesCommand::Check { path, .. } => commands::rules::check(path),
        },
    }
}
