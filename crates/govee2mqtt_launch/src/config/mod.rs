//! Add-on options parsing and validation

mod log_level;
mod options;

pub use log_level::*;
pub use options::*;
