//! Central place for default values.
//! Update these and the CLI, the TUI and the backends all pick them up.

pub struct Defaults;

impl Defaults {
    /* Backend selection */
    pub const BACKEND: &'static str = "local";

    /* Remote (REST) backend */
    pub const API_URL: &'static str = "http://localhost:5001";
    pub const RESTAURANT_ID: u64 = 1;

    /* Local backend: one JSON array under one key */
    pub const DATA_DIR: &'static str = "./menu_data";
    pub const STORAGE_KEY: &'static str = "menu_items";

    /* Display */
    pub const CURRENCY: &'static str = "R$";

    /* Logging */
    pub const LOG_FILE: &'static str = "./menu-manager.log";
    pub const LOG_FILTER: &'static str = "info";
    pub const CLI_LOG_FILTER: &'static str = "warn";
}
