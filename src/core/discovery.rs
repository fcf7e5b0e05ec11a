//! Background repository discovery and the channel it reports on.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

use serde_json::Value;

use super::RepoRoot;

/// Batches the worker may queue before it blocks.
pub const DISCOVERY_CHANNEL_BOUND: usize = 16;

/// One message on the discovery channel: a batch of `{path, ...}` objects.
pub type DiscoveryBatch = Vec<Value>;

/// A repository reported by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepo {
    /// Working tree root.
    pub path: PathBuf,
}

impl DiscoveredRepo {
    /// Wire form sent over the channel, or `None` when the path is not UTF-8.
    pub fn to_message(&self) -> Option<Value> {
        let path = self.path.to_str()?;
        Some(serde_json::json!({ "path": path }))
    }
}

/// Encode repositories for the channel, skipping paths JSON cannot carry.
pub fn encode_batch(found: &[DiscoveredRepo]) -> DiscoveryBatch {
    found
        .iter()
        .filter_map(|repo| {
            let message = repo.to_message();
            if message.is_none() {
                log::warn!(
                    "dropping discovered repository with non UTF-8 path: {}",
                    repo.path.display()
                );
            }
            message
        })
        .collect()
}

/// Parse a batch, dropping malformed entries with a diagnostic.
pub fn parse_batch(batch: DiscoveryBatch) -> Vec<DiscoveredRepo> {
    batch
        .into_iter()
        .filter_map(|value| match value.get("path").and_then(Value::as_str) {
            Some(path) if !path.is_empty() => Some(DiscoveredRepo {
                path: PathBuf::from(path),
            }),
            _ => {
                log::warn!("dropping malformed discovery message: {}", value);
                None
            }
        })
        .collect()
}

/// Sending half handed to the discovery worker.
pub type DiscoverySender = SyncSender<DiscoveryBatch>;

/// Receiving half drained by the UI loop.
#[derive(Debug)]
pub struct DiscoveryInbox {
    rx: Receiver<DiscoveryBatch>,
}

/// Create a bounded discovery channel.
pub fn discovery_channel() -> (DiscoverySender, DiscoveryInbox) {
    let (tx, rx) = mpsc::sync_channel(DISCOVERY_CHANNEL_BOUND);
    (tx, DiscoveryInbox { rx })
}

impl DiscoveryInbox {
    /// Drain every pending batch without blocking.
    pub fn drain(&self) -> Vec<DiscoveredRepo> {
        let mut found = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(batch) => found.extend(parse_batch(batch)),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        found
    }
}

/// Produces repository roots for the discovery worker.
pub trait RepoFinder: Send + 'static {
    /// Find repositories. Runs on the worker thread.
    fn find(&self) -> Vec<DiscoveredRepo>;
}

/// Resolves each configured path to its enclosing working tree.
#[derive(Debug, Clone)]
pub struct GitRepoFinder {
    roots: Vec<PathBuf>,
}

impl GitRepoFinder {
    /// Create a finder over the given starting paths.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl RepoFinder for GitRepoFinder {
    fn find(&self) -> Vec<DiscoveredRepo> {
        self.roots
            .iter()
            .filter_map(|root| match RepoRoot::discover(root) {
                Ok(repo) => Some(DiscoveredRepo {
                    path: repo.into_path(),
                }),
                Err(e) => {
                    log::warn!("skipping {}: {}", root.display(), e);
                    None
                }
            })
            .collect()
    }
}

/// Handle to the discovery thread. Joins on drop.
pub struct DiscoveryWorker {
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for DiscoveryWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryWorker")
            .field("handle", &self.handle.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Run `finder` on a background thread, reporting one batch on `tx`.
pub fn spawn_discovery_worker(finder: impl RepoFinder, tx: DiscoverySender) -> DiscoveryWorker {
    let handle = thread::spawn(move || {
        let found = finder.find();
        log::debug!("discovery finished with {} repositories", found.len());
        let batch = encode_batch(&found);
        // Receiver gone means the app already shut down.
        let _ = tx.send(batch);
    });

    DiscoveryWorker {
        handle: Some(handle),
    }
}

impl Drop for DiscoveryWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_entries_are_dropped() {
        let found = parse_batch(vec![
            json!({ "path": "/src/a" }),
            json!({ "name": "no path" }),
            json!({ "path": 42 }),
            json!("not an object"),
            json!({ "path": "/src/b", "extra": true }),
        ]);
        let paths: Vec<_> = found.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/src/a"), PathBuf::from("/src/b")]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_skipped_when_encoding() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = DiscoveredRepo {
            path: PathBuf::from(OsStr::from_bytes(b"/tmp/bad\xff")),
        };
        assert_eq!(bad.to_message(), None);

        let good = DiscoveredRepo {
            path: PathBuf::from("/tmp/good"),
        };
        let batch = encode_batch(&[bad, good.clone()]);
        assert_eq!(parse_batch(batch), vec![good]);
    }

    #[test]
    fn inbox_drains_all_pending_batches() {
        let (tx, inbox) = discovery_channel();
        tx.send(vec![json!({ "path": "/a" })]).unwrap();
        tx.send(vec![json!({ "bogus": 1 }), json!({ "path": "/b" })]).unwrap();

        let found = inbox.drain();
        assert_eq!(found.len(), 2);
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn drain_after_disconnect_is_empty() {
        let (tx, inbox) = discovery_channel();
        drop(tx);
        assert!(inbox.drain().is_empty());
    }

    struct FixedFinder(Vec<&'static str>);

    impl RepoFinder for FixedFinder {
        fn find(&self) -> Vec<DiscoveredRepo> {
            self.0
                .iter()
                .map(|p| DiscoveredRepo {
                    path: PathBuf::from(p),
                })
                .collect()
        }
    }

    #[test]
    fn worker_reports_one_batch() {
        let (tx, inbox) = discovery_channel();
        let worker = spawn_discovery_worker(FixedFinder(vec!["/x", "/y"]), tx);
        drop(worker);

        let found = inbox.drain();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path, PathBuf::from("/x"));
    }
}
