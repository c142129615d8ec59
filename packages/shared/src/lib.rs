//! Utilities shared by the wagate binaries.

pub mod logger;
