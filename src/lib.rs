//! licita-crawler library
//!
//! This crate provides the core functionality for the `licita-crawler` binary.
//! Keep the crate root minimal; implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that drive a WebDriver browser
//! through the Spanish public procurement portal:
//!
//! - [`browser`] - WebDriver session lifecycle, page settling and auxiliary tabs
//! - [`navigator`] - Resilient element interaction over ordered candidate-selector lists
//! - [`crawler`] - Search form submission, result pagination and detail-page scraping
//! - [`export`] - CSV/JSON persistence of the scraped records
//! - [`cli`] - Command-line interface and the interactive region menu
//! - [`models`] - Regions and the scraped tender record
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! A run needs a reachable chromedriver; everything else is driven from the CLI:
//!
//! ```no_run
//! use licita_crawler::{cli, errors::AppResult};
//!
//! # async fn example() -> AppResult<()> {
//! cli::cli().await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod constants;
pub mod crawler;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod navigator;
pub mod ui;
pub mod utils;
