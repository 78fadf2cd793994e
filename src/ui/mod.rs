pub mod components;
pub mod dialog;
pub mod help;
pub mod layout;
pub mod style;
