use anyhow::Result;
use clap::Parser;

use menu_management_utility::app::{run_tui, AppCtx};
use menu_management_utility::cli::{Cli, Command};
use menu_management_utility::commands;
use menu_management_utility::config::Config;
use menu_management_utility::form::FormFields;
use menu_management_utility::logging;
use menu_management_utility::notifier::ConsoleNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from(cli.config);

    let Some(cmd) = cli.cmd else {
        logging::init_file(&config.log_file)?;
        let repo = config.open_repository()?;
        return run_tui(AppCtx::new(repo, &config.currency)).await;
    };

    logging::init_stderr();
    let repo = config.open_repository()?;
    let repo = repo.as_ref();

    match cmd {
        Command::List { json } => {
            let notifier = ConsoleNotifier::default();
            commands::list::run(repo, &notifier, &config.currency, json).await
        }

        Command::Add { name, description, price } => {
            let notifier = ConsoleNotifier::default();
            commands::add::run(repo, &notifier, FormFields { name, description, price }).await
        }

        Command::Edit { id, name, description, price } => {
            let notifier = ConsoleNotifier::default();
            let changes = commands::edit::FieldChanges { name, description, price };
            commands::edit::run(repo, &notifier, id, changes).await
        }

        Command::Delete { id, yes } => {
            let notifier = ConsoleNotifier { assume_yes: yes };
            commands::delete::run(repo, &notifier, id).await
        }
    }
}
