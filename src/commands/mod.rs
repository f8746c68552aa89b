//! Command implementations for winstage CLI

pub mod completions;
pub mod driver_package;
pub mod fonts;
pub mod models;
pub mod version;
