//! Gaia node chat automation library

pub mod auth;
pub mod chat;
pub mod config;
pub mod http;
pub mod nodes;
pub mod observability;
pub mod persona;
pub mod resilience;
pub mod scheduler;
pub mod terminal;
pub mod wallet;

pub use config::schema::AppConfig;
pub use scheduler::{RunError, RunSummary, Scheduler};
