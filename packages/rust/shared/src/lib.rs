//! Shared types, error model, and configuration for sheetsite.
//!
//! This crate is the foundation depended on by all other sheetsite crates.
//! It provides:
//! - [`SheetsiteError`] — the unified error type
//! - Section identity and provenance types ([`SectionKind`], [`Provenance`], [`SectionState`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FeedbackConfig, HttpConfig, SourcesConfig, config_dir, config_file_path,
    init_config, init_config_at, load_config, load_config_from,
};
pub use error::{Result, SheetsiteError};
pub use types::{Provenance, SectionKind, SectionState};
