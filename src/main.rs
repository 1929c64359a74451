//! WebBundle CLI - build-time web asset bundler
//!
//! Usage: webbundle <COMMAND>
//!
//! Commands:
//!   generate  Regenerate the embedded asset bundle
//!   check     Verify the bundle is up to date (CI / pre-link gate)
//!   watch     Watch the asset directory and regenerate continuously
//!   list      Show the constants the bundle would contain

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use webbundle::config::{Config, ConfigWarning, CONFIG_FILE};
use webbundle::generate::Freshness;
use webbundle::writer::WriteStatus;

/// WebBundle - build-time web asset bundler
#[derive(Parser, Debug)]
#[command(name = "webbundle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate the embedded asset bundle
    Generate {
        /// Project root the configured paths resolve against
        #[arg(short, long, default_value = ".")]
        project_root: PathBuf,
    },

    /// Verify the bundle is up to date (exits non-zero when stale)
    Check {
        /// Project root the configured paths resolve against
        #[arg(short, long, default_value = ".")]
        project_root: PathBuf,
    },

    /// Watch the asset directory and regenerate continuously
    Watch {
        /// Project root the configured paths resolve against
        #[arg(short, long, default_value = ".")]
        project_root: PathBuf,
    },

    /// Show the constants the bundle would contain
    List {
        /// Project root the configured paths resolve against
        #[arg(short, long, default_value = ".")]
        project_root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { project_root } => cmd_generate(&project_root, cli.json),
        Commands::Check { project_root } => cmd_check(&project_root, cli.json),
        Commands::Watch { project_root } => cmd_watch(&project_root, cli.json),
        Commands::List { project_root } => cmd_list(&project_root, cli.json),
    }
}

/// Load the project config, surfacing unknown-key warnings.
fn load_config(project_root: &Path) -> (Config, Vec<ConfigWarning>) {
    let path = project_root.join(CONFIG_FILE);
    if path.exists() {
        match Config::load_with_warnings(&path) {
            Ok((config, warnings)) => return (config.with_env_overrides(), warnings),
            Err(e) => eprintln!("⚠ {}", e),
        }
    }
    (Config::default().with_env_overrides(), Vec::new())
}

fn print_warnings(warnings: &[ConfigWarning], json: bool) {
    if json {
        return;
    }
    for warning in warnings {
        println!(
            "⚠ unknown config key '{}' in {}",
            warning.key,
            warning.file.display()
        );
    }
}

fn cmd_generate(project_root: &PathBuf, json: bool) -> Result<()> {
    use webbundle::generate::generate;

    let (config, warnings) = load_config(project_root);

    if !json {
        println!("📦 WebBundle Generate");
        println!("Root: {}", project_root.display());
    }
    print_warnings(&warnings, json);

    let report = generate(project_root, &config)?;

    if json {
        let output = serde_json::json!({
            "event": "generate",
            "assets": report.assets,
            "header": {
                "path": report.header.path.display().to_string(),
                "written": report.header.status == WriteStatus::Written,
            },
            "source": {
                "path": report.source.path.display().to_string(),
                "written": report.source.status == WriteStatus::Written,
            },
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("\n✓ Found {} asset files", report.assets);
        for file in [&report.header, &report.source] {
            match file.status {
                WriteStatus::Written => println!("✓ wrote {}", file.path.display()),
                WriteStatus::UpToDate => println!("· up to date: {}", file.path.display()),
            }
        }
    }

    Ok(())
}

fn cmd_check(project_root: &PathBuf, json: bool) -> Result<()> {
    use webbundle::generate::check;

    let (config, warnings) = load_config(project_root);

    if !json {
        println!("🔍 WebBundle Check");
        println!("Root: {}", project_root.display());
        println!();
    }
    print_warnings(&warnings, json);

    let report = check(project_root, &config)?;

    if json {
        let output = serde_json::json!({
            "event": "check",
            "assets": report.assets,
            "header": {
                "path": report.header.path.display().to_string(),
                "status": freshness_label(report.header.freshness),
            },
            "source": {
                "path": report.source.path.display().to_string(),
                "status": freshness_label(report.source.freshness),
            },
            "fresh": report.is_fresh(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for file in [&report.header, &report.source] {
            let icon = match file.freshness {
                Freshness::UpToDate => "✓",
                Freshness::Modified | Freshness::Missing => "✗",
            };
            println!(
                "{} {}: {}",
                icon,
                freshness_label(file.freshness),
                file.path.display()
            );
        }
        println!();
        if report.is_fresh() {
            println!("🟢 Bundle is up to date ({} assets)", report.assets);
        } else {
            println!("🔴 Bundle is stale - run `webbundle generate`");
        }
    }

    if !report.is_fresh() {
        std::process::exit(1);
    }

    Ok(())
}

fn freshness_label(freshness: Freshness) -> &'static str {
    match freshness {
        Freshness::UpToDate => "up to date",
        Freshness::Modified => "stale",
        Freshness::Missing => "missing",
    }
}

fn cmd_watch(project_root: &PathBuf, json: bool) -> Result<()> {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use webbundle::watcher::{watch, WatchEvent, WatchOptions};

    let (config, warnings) = load_config(project_root);
    print_warnings(&warnings, json);

    let options = WatchOptions {
        project_root: project_root.clone(),
        config,
    };

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })?;

    if !json {
        println!("👀 WebBundle Watch");
        println!("Root: {}", project_root.display());
        println!("Press Ctrl+C to stop\n");
    }

    watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            match event {
                WatchEvent::Started { asset_dir } => {
                    println!("📂 Watching: {}", asset_dir);
                }
                WatchEvent::FileChanged { path } => {
                    println!("📝 Changed: {}", path);
                }
                WatchEvent::GenerateStarted => {
                    println!("🔄 Generating...");
                }
                WatchEvent::GenerateComplete {
                    assets,
                    written,
                    up_to_date,
                } => {
                    println!(
                        "✓ Bundle: {} assets, {} written, {} up to date",
                        assets, written, up_to_date
                    );
                }
                WatchEvent::Error { message } => {
                    eprintln!("✗ Error: {}", message);
                }
                WatchEvent::Shutdown => {
                    println!("\n👋 Shutting down...");
                }
            }
        }
    })?;

    Ok(())
}

fn cmd_list(project_root: &PathBuf, json: bool) -> Result<()> {
    use webbundle::generate::list_entries;

    let (config, warnings) = load_config(project_root);
    print_warnings(&warnings, json);

    let entries = list_entries(project_root, &config)?;

    if json {
        for entry in &entries {
            let output = serde_json::json!({
                "event": "entry",
                "identifier": entry.identifier,
                "delimiter": entry.delimiter,
                "file": entry.file_name,
                "bytes": entry.content.len(),
            });
            println!("{}", serde_json::to_string(&output)?);
        }
    } else {
        println!("🔍 WebBundle List");
        println!("Root: {}", project_root.display());
        println!("\nFound {} assets:\n", entries.len());
        for entry in &entries {
            println!("┌─ {}", entry.identifier);
            println!("│  File: {}", entry.file_name);
            println!("│  Delimiter: {}", entry.delimiter);
            println!("│  Size: {} bytes", entry.content.len());
            println!("└─");
        }
    }

    Ok(())
}
