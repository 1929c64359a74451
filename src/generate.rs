//! The generation pipeline
//!
//! Ties scanner, naming, codegen, and writer together into the operations
//! the build collaborator invokes: `generate` writes the pair, `check`
//! verifies it without writing. Both are idempotent and safe to re-run at
//! any point of the surrounding build.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::{read_entries, render_header, render_source, BundleEntry};
use crate::config::Config;
use crate::error::BundleResult;
use crate::scanner::scan_assets;
use crate::writer::{write_if_changed, WriteStatus};

/// Per-output outcome of a generation pass
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Output path as configured (relative to the project root)
    pub path: PathBuf,
    pub status: WriteStatus,
}

/// Outcome of one `generate` invocation
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Number of asset files embedded
    pub assets: usize,
    pub header: FileReport,
    pub source: FileReport,
}

impl GenerateReport {
    /// Number of output files actually rewritten (0..=2)
    pub fn written_count(&self) -> usize {
        [&self.header, &self.source]
            .iter()
            .filter(|f| f.status == WriteStatus::Written)
            .count()
    }

    /// Number of output files left untouched (0..=2)
    pub fn up_to_date_count(&self) -> usize {
        2 - self.written_count()
    }
}

/// Freshness of one output file as seen by `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// On-disk bytes match the rendered text
    UpToDate,
    /// File exists but differs from the rendered text
    Modified,
    /// File does not exist or is unreadable
    Missing,
}

/// Per-output outcome of a check pass
#[derive(Debug, Clone)]
pub struct FileCheck {
    pub path: PathBuf,
    pub freshness: Freshness,
}

/// Outcome of one `check` invocation
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub assets: usize,
    pub header: FileCheck,
    pub source: FileCheck,
}

impl CheckReport {
    /// True when both outputs already match the asset set.
    pub fn is_fresh(&self) -> bool {
        self.header.freshness == Freshness::UpToDate
            && self.source.freshness == Freshness::UpToDate
    }
}

/// Entries a generation pass would embed, for listings and debugging.
pub fn list_entries(project_root: &Path, config: &Config) -> BundleResult<Vec<BundleEntry>> {
    let asset_dir = project_root.join(&config.assets.dir);
    let assets = scan_assets(&asset_dir, &config.assets.extension)?;
    read_entries(&assets)
}

struct Rendered {
    assets: usize,
    header_text: String,
    source_text: String,
}

fn render_pair(project_root: &Path, config: &Config) -> BundleResult<Rendered> {
    let entries = list_entries(project_root, config)?;
    Ok(Rendered {
        assets: entries.len(),
        header_text: render_header(&entries, config),
        source_text: render_source(&entries, config),
    })
}

/// Run one generation pass over the project.
///
/// Scans the asset directory, renders the header/source pair, and rewrites
/// each output only when its content differs from what is on disk. All
/// rendering (and with it every validation) happens before the first write,
/// so a failing pass leaves existing outputs untouched.
pub fn generate(project_root: &Path, config: &Config) -> BundleResult<GenerateReport> {
    let header_path = project_root.join(&config.output.header);
    let source_path = project_root.join(&config.output.source);

    for out in [&header_path, &source_path] {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    let rendered = render_pair(project_root, config)?;
    let atomic = config.generator.atomic_writes;

    let header_status = write_if_changed(&header_path, &rendered.header_text, atomic)?;
    let source_status = write_if_changed(&source_path, &rendered.source_text, atomic)?;

    Ok(GenerateReport {
        assets: rendered.assets,
        header: FileReport {
            path: config.output.header.clone(),
            status: header_status,
        },
        source: FileReport {
            path: config.output.source.clone(),
            status: source_status,
        },
    })
}

/// Verify the outputs against the current asset set without writing.
pub fn check(project_root: &Path, config: &Config) -> BundleResult<CheckReport> {
    let rendered = render_pair(project_root, config)?;

    Ok(CheckReport {
        assets: rendered.assets,
        header: FileCheck {
            path: config.output.header.clone(),
            freshness: freshness_of(
                &project_root.join(&config.output.header),
                &rendered.header_text,
            ),
        },
        source: FileCheck {
            path: config.output.source.clone(),
            freshness: freshness_of(
                &project_root.join(&config.output.source),
                &rendered.source_text,
            ),
        },
    })
}

fn freshness_of(path: &Path, expected: &str) -> Freshness {
    match fs::read(path) {
        Ok(bytes) if bytes == expected.as_bytes() => Freshness::UpToDate,
        Ok(_) => Freshness::Modified,
        Err(_) => Freshness::Missing,
    }
}
