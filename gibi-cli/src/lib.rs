//! Command-line front end for the `gibi-core` tax engine.

pub mod app;
pub mod cli;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod output;
pub mod utils;
