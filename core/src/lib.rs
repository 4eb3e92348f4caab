pub mod config;
pub mod errors;
pub mod files;
pub mod globus;
pub mod walker;
