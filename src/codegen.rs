//! Rendering of the generated header/source pair
//!
//! The output format is what the firmware build expects: an include-guarded
//! header declaring one storage-qualified constant per asset, and a source
//! file defining each constant as a raw string literal wrapped in a
//! per-constant delimiter. The exact line layout is load-bearing - the
//! write-only-on-change comparison is byte equality, so rendering must be
//! deterministic down to the final newline.

use std::fs;

use crate::config::Config;
use crate::error::{BundleError, BundleResult};
use crate::naming::{delimiter_for, NameRegistry};
use crate::scanner::AssetFile;

/// One asset prepared for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Constant name declared in the header (`INDEX_HTML`)
    pub identifier: String,
    /// Raw-literal delimiter (`INDEXHTMLDL`)
    pub delimiter: String,
    /// Source filename, kept for diagnostics and listings
    pub file_name: String,
    /// Verbatim file content
    pub content: String,
}

impl BundleEntry {
    /// Read one asset from disk and derive its names.
    pub fn read(asset: &AssetFile, names: &mut NameRegistry) -> BundleResult<Self> {
        let identifier = names.claim(&asset.name)?;
        let delimiter = delimiter_for(&identifier);

        let bytes = fs::read(&asset.path)?;
        let content = String::from_utf8(bytes).map_err(|_| BundleError::AssetNotUtf8 {
            file: asset.path.clone(),
        })?;

        // The sequence `)DELIM"` anywhere in the content would terminate the
        // raw literal early and corrupt the generated source.
        let terminator = format!("){delimiter}\"");
        if content.contains(&terminator) {
            return Err(BundleError::DelimiterCollision {
                file: asset.path.clone(),
                delimiter,
            });
        }

        Ok(Self {
            identifier,
            delimiter,
            file_name: asset.name.clone(),
            content,
        })
    }
}

/// Read all assets into entries, in input order.
pub fn read_entries(assets: &[AssetFile]) -> BundleResult<Vec<BundleEntry>> {
    let mut names = NameRegistry::new();
    assets
        .iter()
        .map(|asset| BundleEntry::read(asset, &mut names))
        .collect()
}

/// Render the header text declaring every constant.
pub fn render_header(entries: &[BundleEntry], config: &Config) -> String {
    let cg = &config.codegen;

    if entries.is_empty() {
        return format!(
            "#ifndef {guard}\n#define {guard}\n\n#include {include}\n\n#endif\n",
            guard = cg.guard,
            include = cg.include,
        );
    }

    let mut lines = vec![
        format!("#ifndef {}", cg.guard),
        format!("#define {}", cg.guard),
        String::new(),
        format!("#include {}", cg.include),
        String::new(),
    ];

    for entry in entries {
        lines.push(format!(
            "extern const char {}[] {};",
            entry.identifier, cg.qualifier
        ));
    }

    lines.push("\n#endif".to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render the source text defining every constant.
pub fn render_source(entries: &[BundleEntry], config: &Config) -> String {
    let header = config.header_file_name();

    if entries.is_empty() {
        return format!(
            "#include \"{}\"\n\n// no {} files\n",
            header, config.assets.extension
        );
    }

    let mut lines = vec![format!("#include \"{header}\""), String::new()];

    for entry in entries {
        // extern on the definition keeps external linkage for const arrays.
        lines.push(format!(
            "extern const char {}[] {} = R\"{}(",
            entry.identifier, config.codegen.qualifier, entry.delimiter
        ));
        lines.push(entry.content.clone());
        lines.push(format!("){}\";\n", entry.delimiter));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
