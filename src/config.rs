//! Configuration for the bundle generator
//!
//! Defaults reproduce the original firmware project layout (assets in
//! `web/`, outputs at `include/html.h` and `src/html.cpp`), so a bare
//! invocation is drop-in compatible. Overrides come from an optional
//! `webbundle.toml` at the project root, then `WEBBUNDLE_*` environment
//! variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, BundleResult};

/// Name of the optional project config file
pub const CONFIG_FILE: &str = "webbundle.toml";

/// Asset input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory scanned for assets, relative to the project root
    #[serde(default = "default_asset_dir")]
    pub dir: PathBuf,

    /// Extension matched by the scan, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_asset_dir(),
            extension: default_extension(),
        }
    }
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_extension() -> String {
    "html".to_string()
}

/// Output path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Generated header path, relative to the project root
    #[serde(default = "default_header")]
    pub header: PathBuf,

    /// Generated source path, relative to the project root
    #[serde(default = "default_source")]
    pub source: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            source: default_source(),
        }
    }
}

fn default_header() -> PathBuf {
    PathBuf::from("include/html.h")
}

fn default_source() -> PathBuf {
    PathBuf::from("src/html.cpp")
}

/// Emitted-code configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Include guard symbol for the header
    #[serde(default = "default_guard")]
    pub guard: String,

    /// Include directive payload providing the storage qualifier
    #[serde(default = "default_include")]
    pub include: String,

    /// Storage qualifier attached to every constant
    #[serde(default = "default_qualifier")]
    pub qualifier: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            guard: default_guard(),
            include: default_include(),
            qualifier: default_qualifier(),
        }
    }
}

fn default_guard() -> String {
    "HTML_H".to_string()
}

fn default_include() -> String {
    "<pgmspace.h>".to_string()
}

fn default_qualifier() -> String {
    "PROGMEM".to_string()
}

/// Generator behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Write outputs via tempfile + rename
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            atomic_writes: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub codegen: CodegenConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unrecognized key
    pub key: String,
    pub file: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BundleResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys).
    pub fn load_with_warnings(path: &Path) -> BundleResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| BundleError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ConfigWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from the project config file if present, else defaults.
    pub fn load_or_default(project_root: &Path) -> Self {
        let path = project_root.join(CONFIG_FILE);
        if path.exists() {
            if let Ok(config) = Self::load(&path) {
                return config.with_env_overrides();
            }
        }
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides (WEBBUNDLE_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        // WEBBUNDLE_ASSET_DIR
        if let Ok(dir) = std::env::var("WEBBUNDLE_ASSET_DIR") {
            if !dir.is_empty() {
                self.assets.dir = PathBuf::from(dir);
            }
        }

        // WEBBUNDLE_ATOMIC_WRITES
        if let Ok(val) = std::env::var("WEBBUNDLE_ATOMIC_WRITES") {
            self.generator.atomic_writes = val.to_lowercase() != "false" && val != "0";
        }

        self
    }

    /// Filename of the generated header, as referenced by the source include
    pub fn header_file_name(&self) -> String {
        self.output
            .header
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "html.h".to_string())
    }
}
