// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod logger;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod cli;
pub mod csv;
pub mod data;
pub mod derive;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod source;
pub mod store;
