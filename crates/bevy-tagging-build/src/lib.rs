//! Build-time utilities for bevy-tagging.
//!
//! This crate provides tools for:
//! - Parsing the `tags.toml` tag registry
//! - Generating a Rust module of string constants, one per tag
//! - Regenerating that module while the registry is being edited
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     println!("cargo:rerun-if-changed=tags.toml");
//!     let out = std::path::Path::new(&std::env::var("OUT_DIR").unwrap()).join("tags.rs");
//!     bevy_tagging_build::generate("tags.toml", out).expect("Failed to generate tags");
//! }
//! ```
//!
//! # Registry format
//!
//! ```toml
//! prefix = "TAG_"       # optional
//! module_name = "tags"  # optional
//!
//! [tags]
//! names = ["Player", "Main Camera", "Enemy"]
//! ```
//!
//! produces `tags::TAG_Player`, `tags::TAG_Main_Camera`, `tags::TAG_Enemy`
//! and `tags::ALL`.

mod codegen;
mod toml_parser;
mod watcher;

pub use codegen::{body_of, const_name, generate_body, generate_constants_code};
pub use toml_parser::{TagsConfig, TagsConfigError, DEFAULT_MODULE, DEFAULT_PREFIX};
pub use watcher::{PollOutcome, RegistryWatcher, WatcherConfig, DEFAULT_INTERVAL};

use std::path::Path;
use thiserror::Error;

/// Main entry point for build.rs integration.
///
/// Reads `tags.toml` and writes the generated module to `output_path`,
/// skipping the write when the existing file already has the same body.
///
/// Returns `true` if the file was written.
///
/// # Errors
///
/// Returns an error if:
/// - `tags.toml` cannot be read or parsed
/// - Two tags map to the same constant name
/// - Output file cannot be written
pub fn generate(
    config_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<bool, GenerateError> {
    let config = TagsConfig::from_file(config_path)?;
    write_if_changed(&config, output_path)
}

/// Write the generated module for an already-parsed registry.
///
/// Returns `true` if the file was written.
pub fn write_if_changed(
    config: &TagsConfig,
    output_path: impl AsRef<Path>,
) -> Result<bool, GenerateError> {
    let output_path = output_path.as_ref();

    if let Ok(existing) = std::fs::read_to_string(output_path)
        && body_of(&existing) == Some(generate_body(config).as_str())
    {
        return Ok(false);
    }

    let code = generate_constants_code(config);
    std::fs::write(output_path, code).map_err(|source| GenerateError::Write {
        path: output_path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %output_path.display(), tags = config.len(), "wrote tag constants");
    Ok(true)
}

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Failed to read or validate tags.toml
    #[error("Config error: {0}")]
    Config(#[from] TagsConfigError),

    /// Failed to write the generated file
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
