//! WebBundle - build-time web asset bundler
//!
//! WebBundle scans a directory of static web assets and regenerates a C++
//! header/source pair embedding each file as a storage-qualified string
//! constant, so firmware can serve its UI without a runtime filesystem.
//! Outputs are rewritten only when their content actually changes, keeping
//! downstream rebuild cascades quiet.

pub mod buildscript;
pub mod codegen;
pub mod config;
pub mod error;
pub mod generate;
pub mod naming;
pub mod scanner;
pub mod watcher;
pub mod writer;

// Re-exports for convenience
pub use codegen::{read_entries, render_header, render_source, BundleEntry};
pub use config::Config;
pub use error::{BundleError, BundleResult};
pub use generate::{check, generate, list_entries, CheckReport, Freshness, GenerateReport};
pub use naming::{const_name, delimiter_for, NameRegistry};
pub use scanner::{scan_assets, AssetFile};
pub use watcher::{watch, WatchEvent, WatchOptions};
pub use writer::{write_if_changed, WriteStatus};
