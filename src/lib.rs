//! Fittrack - fitness tracking over SQLite
//!
//! This library crate exposes the front-end pieces of the binary for
//! integration testing. The data layer lives in `fittrack-db`.

pub mod config;
pub mod export;
pub mod menu;
pub mod seed;
