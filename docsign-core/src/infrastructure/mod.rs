//! Infrastructure layer: I/O and external integrations.

pub mod audit;
pub mod config;
pub mod logging;
pub mod session;
pub mod storage;
