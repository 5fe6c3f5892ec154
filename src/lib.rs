pub mod catalog;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod reconcile;
pub mod takeout;
