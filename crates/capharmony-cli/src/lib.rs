//! capharmony library - Harmony native project tooling
//!
//! Exposes the command handlers and the Harmony operations for the binary and
//! for integration tests.

pub mod commands;
pub mod common;
pub mod errors;
pub mod fs_utils;
pub mod harmony;

pub use capharmony_logger as logger;
pub use common::GlobalOpts;
