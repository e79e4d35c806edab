#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod formats;
pub mod interactive;
pub mod logging;
pub mod query;
pub mod search;
pub mod thumbnail;
pub mod volumes;
