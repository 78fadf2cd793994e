use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::defaults::Defaults;

/// Menu management utility: TUI + scriptable commands
#[derive(Parser, Debug)]
#[command(version, about = "Manage a restaurant menu from the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Without a command the interactive TUI starts
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// JSON file on this machine
    Local,
    /// REST API
    Remote,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Where menu items are stored
    #[arg(long, global = true, env = "MENU_BACKEND", value_enum, default_value = Defaults::BACKEND)]
    pub backend: Backend,

    /// Base URL of the REST API (remote backend)
    #[arg(long, global = true, env = "MENU_API_URL", default_value = Defaults::API_URL)]
    pub api_url: String,

    /// Restaurant whose products are managed (remote backend)
    #[arg(long, global = true, env = "MENU_RESTAURANT_ID", default_value_t = Defaults::RESTAURANT_ID)]
    pub restaurant_id: u64,

    /// Directory holding the local store (local backend)
    #[arg(long, global = true, env = "MENU_DATA_DIR", default_value = Defaults::DATA_DIR)]
    pub data_dir: PathBuf,

    /// Storage key the collection is saved under (local backend)
    #[arg(long, global = true, env = "MENU_STORAGE_KEY", default_value = Defaults::STORAGE_KEY)]
    pub storage_key: String,

    /// Currency symbol shown in front of prices
    #[arg(long, global = true, env = "MENU_CURRENCY", default_value = Defaults::CURRENCY)]
    pub currency: String,

    /// Log file used while the TUI owns the terminal
    #[arg(long, global = true, env = "MENU_LOG_FILE", default_value = Defaults::LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every menu item
    List {
        /// Print the items as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Create a new menu item
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Price as a decimal number, e.g. 48.50
        #[arg(long)]
        price: String,
    },

    /// Edit an existing item; omitted fields keep their current value
    Edit {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<String>,
    },

    /// Delete an item after confirmation
    Delete {
        #[arg(long)]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_local_backend_and_tui() {
        let cli = Cli::try_parse_from(["menu-manager"]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.config.backend, Backend::Local);
        assert_eq!(cli.config.storage_key, Defaults::STORAGE_KEY);
        assert_eq!(cli.config.restaurant_id, Defaults::RESTAURANT_ID);
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "menu-manager", "delete", "--id", "4", "-y", "--backend", "remote", "--restaurant-id", "9",
        ])
        .unwrap();
        assert_eq!(cli.config.backend, Backend::Remote);
        assert_eq!(cli.config.restaurant_id, 9);
        assert!(matches!(cli.cmd, Some(Command::Delete { id: 4, yes: true })));
    }

    #[test]
    fn add_requires_name_and_price() {
        assert!(Cli::try_parse_from(["menu-manager", "add", "--name", "Soda"]).is_err());
        assert!(Cli::try_parse_from(["menu-manager", "add", "--name", "Soda", "--price", "3.5"]).is_ok());
    }
}
