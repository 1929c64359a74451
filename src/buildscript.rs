//! Cargo build-script integration
//!
//! Firmware crates that vendor their web UI call [`run`] from `build.rs`:
//! it regenerates the bundle and prints the `cargo:rerun-if-changed`
//! directives that make Cargo re-invoke the step whenever an asset changes,
//! the same pre-link dependency contract script-driven build systems
//! declare by hand.

use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::BundleResult;
use crate::generate::{generate, GenerateReport};
use crate::scanner::scan_assets;

/// Rerun directives for the current asset set.
///
/// The directory itself is included so added or removed files retrigger
/// the build, not just edits to already-known files.
pub fn rerun_directives(project_root: &Path, config: &Config) -> BundleResult<Vec<String>> {
    let asset_dir = project_root.join(&config.assets.dir);

    let mut directives = vec![format!("cargo:rerun-if-changed={}", asset_dir.display())];
    for asset in scan_assets(&asset_dir, &config.assets.extension)? {
        directives.push(format!("cargo:rerun-if-changed={}", asset.path.display()));
    }
    Ok(directives)
}

/// Generate the bundle and emit rerun directives on stdout.
///
/// Intended to be the whole body of a consumer's `build.rs`.
pub fn run(project_root: &Path) -> BundleResult<GenerateReport> {
    let config = Config::load_or_default(project_root);
    let report = generate(project_root, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for directive in rerun_directives(project_root, &config)? {
        writeln!(out, "{directive}")?;
    }

    Ok(report)
}
