//! Shared pieces of the blob intake monitor: configuration, the storage
//! and webhook services, and the check-and-alert flow tying them together.

pub mod config;
pub mod env_keys;
pub mod error;
pub mod monitor;
pub mod service;
