//! Command implementations for sqlite-setup CLI

pub mod completions;
pub mod helpers;
pub mod install;
pub mod models;
pub mod platform;
pub mod setup;
pub mod status;
pub mod version;
