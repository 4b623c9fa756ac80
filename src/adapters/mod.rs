// Adapters - External system implementations

pub mod extractive_summary;
pub mod fs_local;
pub mod toml_config;

// Re-export adapters
pub use extractive_summary::ExtractiveSummaryAdapter;
pub use fs_local::FsLocalAdapter;
pub use toml_config::TomlConfigAdapter;
