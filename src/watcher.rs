//! Asset watcher for continuous regeneration
//!
//! Implements the `watch` command with:
//! - Debouncing (100ms)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config as NotifyConfig, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::Config;
use crate::error::{BundleError, BundleResult};
use crate::generate::generate;

/// Debounce duration in milliseconds
const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root the configured paths resolve against
    pub project_root: PathBuf,
    /// Generator configuration
    pub config: Config,
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Started { asset_dir: String },
    FileChanged { path: String },
    GenerateStarted,
    GenerateComplete { assets: usize, written: usize, up_to_date: usize },
    Error { message: String },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        match self {
            WatchEvent::Started { asset_dir } => {
                format!(r#"{{"event":"started","asset_dir":"{}"}}"#, asset_dir)
            }
            WatchEvent::FileChanged { path } => {
                format!(r#"{{"event":"file_changed","path":"{}"}}"#, path)
            }
            WatchEvent::GenerateStarted => r#"{"event":"generate_started"}"#.to_string(),
            WatchEvent::GenerateComplete {
                assets,
                written,
                up_to_date,
            } => {
                format!(
                    r#"{{"event":"generate_complete","assets":{},"written":{},"up_to_date":{}}}"#,
                    assets, written, up_to_date
                )
            }
            WatchEvent::Error { message } => {
                format!(
                    r#"{{"event":"error","message":"{}"}}"#,
                    message.replace('"', "\\\"")
                )
            }
            WatchEvent::Shutdown => r#"{"event":"shutdown"}"#.to_string(),
        }
    }
}

/// Watcher state for debouncing
struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    fn new() -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
        }
    }

    fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    fn should_generate(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
        } else {
            false
        }
    }

    fn take_changes(&mut self) -> Vec<PathBuf> {
        let changes: Vec<_> = self.pending_changes.drain().collect();
        self.last_change = None;
        changes
    }
}

/// Start watching the asset directory for changes.
///
/// Runs one generation pass immediately, then regenerates after every
/// debounced batch of changes to files with the configured extension until
/// `running` goes false.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> BundleResult<()> {
    let asset_dir = options.project_root.join(&options.config.assets.dir);

    event_callback(WatchEvent::Started {
        asset_dir: asset_dir.display().to_string(),
    });

    // Initial pass, so outputs exist before the first change arrives.
    do_generate(&options, &event_callback)?;

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        NotifyConfig::default(),
    )
    .map_err(watch_error)?;

    // The scan itself is non-recursive, so the watch is too.
    watcher
        .watch(&asset_dir, RecursiveMode::NonRecursive)
        .map_err(watch_error)?;

    let extension = options.config.assets.extension.clone();
    let mut state = WatcherState::new();

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == extension)
                .unwrap_or(false);
            if matches {
                event_callback(WatchEvent::FileChanged {
                    path: path.display().to_string(),
                });
                state.add_change(path);
            }
        }

        if state.should_generate() {
            let _changes = state.take_changes();
            do_generate(&options, &event_callback)?;
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

fn watch_error(e: notify::Error) -> BundleError {
    BundleError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

fn do_generate(options: &WatchOptions, callback: &impl Fn(WatchEvent)) -> BundleResult<()> {
    callback(WatchEvent::GenerateStarted);

    let report = match generate(&options.project_root, &options.config) {
        Ok(report) => report,
        Err(e) => {
            callback(WatchEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    callback(WatchEvent::GenerateComplete {
        assets: report.assets,
        written: report.written_count(),
        up_to_date: report.up_to_date_count(),
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[test]
    fn test_watch_event_to_json_started() {
        let event = WatchEvent::Started {
            asset_dir: "web".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\"event\":\"started\""));
        assert!(json.contains("\"asset_dir\":\"web\""));
    }

    #[test]
    fn test_watch_event_to_json_file_changed() {
        let event = WatchEvent::FileChanged {
            path: "web/index.html".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\"event\":\"file_changed\""));
        assert!(json.contains("\"path\":\"web/index.html\""));
    }

    #[test]
    fn test_watch_event_to_json_generate_complete() {
        let event = WatchEvent::GenerateComplete {
            assets: 3,
            written: 1,
            up_to_date: 1,
        };
        let json = event.to_json();
        assert!(json.contains("\"event\":\"generate_complete\""));
        assert!(json.contains("\"assets\":3"));
        assert!(json.contains("\"written\":1"));
        assert!(json.contains("\"up_to_date\":1"));
    }

    #[test]
    fn test_watch_event_to_json_error_escapes_quotes() {
        let event = WatchEvent::Error {
            message: "something \"failed\"".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\\\"failed\\\""));
    }

    #[test]
    fn test_watcher_state_debouncing() {
        let mut state = WatcherState::new();

        assert!(!state.should_generate());

        state.add_change(PathBuf::from("index.html"));

        // Not yet - debounce window still open.
        assert!(!state.should_generate());

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));

        assert!(state.should_generate());

        let changes = state.take_changes();
        assert_eq!(changes.len(), 1);

        assert!(!state.should_generate());
    }

    #[test]
    fn test_watcher_state_coalesces_repeated_changes() {
        let mut state = WatcherState::new();

        state.add_change(PathBuf::from("index.html"));
        state.add_change(PathBuf::from("index.html"));
        state.add_change(PathBuf::from("index.html"));

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));

        let changes = state.take_changes();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_watcher_state_multiple_files() {
        let mut state = WatcherState::new();

        state.add_change(PathBuf::from("a.html"));
        state.add_change(PathBuf::from("b.html"));
        state.add_change(PathBuf::from("c.html"));

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));

        let changes = state.take_changes();
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_watch_runs_initial_generation() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();
        fs::write(dir.path().join("web/index.html"), "<html>").unwrap();

        let options = WatchOptions {
            project_root: dir.path().to_path_buf(),
            config: Config::default(),
        };

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let running = Arc::new(AtomicBool::new(false)); // Stop immediately

        let _ = watch(options, running, |event| {
            events_clone.lock().unwrap().push(event.to_json());
        });

        let captured = events.lock().unwrap();
        assert!(captured[0].contains("started"));
        assert!(captured.iter().any(|e| e.contains("generate_complete")));
        assert!(dir.path().join("include/html.h").exists());
    }
}
