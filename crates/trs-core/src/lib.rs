//! Core domain + application logic for the Telegram Reddit scraper bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and Reddit live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod fetch;
pub mod history;
pub mod logging;
pub mod ports;
pub mod workdir;

pub use errors::{Error, Result};
