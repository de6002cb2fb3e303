pub mod app;
pub mod config;
pub mod logging;
pub mod modules;
pub mod ui;
