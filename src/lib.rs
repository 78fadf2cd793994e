pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod error;
pub mod form;
pub mod list;
pub mod logging;
pub mod notifier;
pub mod repository;
pub mod screens;
pub mod types;
pub mod ui;
