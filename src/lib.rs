pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod resolver;
pub mod service;
pub mod shell;
pub mod store;

#[cfg(test)]
mod testing;
