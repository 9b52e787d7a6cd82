pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod ui;
