//! Extension installation
//!
//! This module handles:
//! - Downloading the release archive for the resolved platform
//! - Extracting it into a scratch directory inside the root
//! - Locating the library regardless of archive layout
//! - Installing it under its canonical name with the executable bit set
//!
//! An extension whose canonical file already sits in the root is never
//! fetched again.

pub mod extract;
pub mod file_ops;
pub mod locate;
pub mod pipeline;

pub use pipeline::{InstallOutcome, InstallationPipeline};
