/// TOML configuration and environment-backed model settings.
pub mod config;
