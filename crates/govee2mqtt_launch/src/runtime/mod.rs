//! Runtime components for the launch sequence

pub mod connect;
pub mod environment;
pub mod launcher;
pub mod process;
pub mod readiness;
pub mod supervisor;

pub use connect::*;
pub use environment::*;
pub use launcher::*;
pub use process::*;
pub use readiness::*;
pub use supervisor::*;
