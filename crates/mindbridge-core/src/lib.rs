pub mod config;
pub mod error;
pub mod types;

pub use config::MindbridgeConfig;
pub use error::{MindbridgeError, Result};
pub use types::*;
