pub mod access_log;
pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};
