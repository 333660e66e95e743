//! In-memory asset source with injectable failures and delays

use std::collections::{HashMap, HashSet};

use super::{AssetError, AssetSource, LoadCompletion, LoadTicket, RegionAsset};

/// Asset source serving assets registered in memory
///
/// Used by tests and by hosts that build regions procedurally. A path can
/// be made to fail or be held back until released, which is how loading
/// races are exercised without threads.
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, RegionAsset>,
    failing: HashSet<String>,
    held: HashSet<String>,
    pending: Vec<(LoadTicket, String)>,
    requests: Vec<String>,
    next_ticket: u64,
}

impl MemoryAssetSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `asset` under `path`
    pub fn insert(&mut self, path: impl Into<String>, asset: RegionAsset) {
        self.assets.insert(path.into(), asset);
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, asset: RegionAsset) -> Self {
        self.insert(path, asset);
        self
    }

    /// Make every load of `path` fail
    pub fn fail(&mut self, path: impl Into<String>) {
        self.failing.insert(path.into());
    }

    /// Keep loads of `path` pending until released
    pub fn hold(&mut self, path: impl Into<String>) {
        self.held.insert(path.into());
    }

    /// Let held loads of `path` complete on the next poll
    pub fn release(&mut self, path: &str) {
        self.held.remove(path);
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    /// Number of requests not yet completed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl AssetSource for MemoryAssetSource {
    fn request(&mut self, path: &str) -> LoadTicket {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.requests.push(path.to_string());
        self.pending.push((ticket, path.to_string()));
        ticket
    }

    fn poll(&mut self) -> Vec<LoadCompletion> {
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, path)| !self.held.contains(path));
        self.pending = waiting;

        ready
            .into_iter()
            .map(|(ticket, path)| {
                let result = if self.failing.contains(&path) {
                    Err(AssetError::Io {
                        path: path.clone().into(),
                        source: std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
                    })
                } else {
                    self.assets
                        .get(&path)
                        .cloned()
                        .ok_or_else(|| AssetError::NotFound(path.clone()))
                };
                LoadCompletion { ticket, path, result }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(name: &str) -> RegionAsset {
        RegionAsset { name: name.to_string(), nodes: Vec::new(), anchors: Vec::new() }
    }

    #[test]
    fn test_held_loads_wait_for_release() {
        let mut source = MemoryAssetSource::new().with("interior.ron", empty("interior"));
        source.hold("interior.ron");
        let ticket = source.request("interior.ron");

        assert!(source.poll().is_empty());
        assert_eq!(source.pending(), 1);

        source.release("interior.ron");
        let completions = source.poll();
        assert_eq!(completions[0].ticket, ticket);
        assert!(completions[0].result.is_ok());
    }

    #[test]
    fn test_injected_failure() {
        let mut source = MemoryAssetSource::new().with("corridor.ron", empty("corridor"));
        source.fail("corridor.ron");
        source.request("corridor.ron");
        source.request("nowhere.ron");

        let completions = source.poll();
        assert!(matches!(completions[0].result, Err(AssetError::Io { .. })));
        assert!(matches!(completions[1].result, Err(AssetError::NotFound(_))));
        assert_eq!(source.requests(), ["corridor.ron", "nowhere.ron"]);
    }
}
