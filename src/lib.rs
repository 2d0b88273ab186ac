pub mod application;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;
pub mod logger;

pub use application::LedgerStore;
pub use domain::*;
