//! Utilities shared by the Chanrelay server and client binaries.

pub mod logger;
pub mod time;
