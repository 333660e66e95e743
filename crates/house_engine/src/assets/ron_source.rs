//! Directory-backed asset source reading `.ron` region files

use std::path::PathBuf;

use super::{AssetError, AssetSource, LoadCompletion, LoadTicket, RegionAsset};

/// Reads region assets from a directory
///
/// Requests are queued and read on the next [`poll`](AssetSource::poll),
/// so callers observe the same request-then-complete protocol as with a
/// truly asynchronous loader.
pub struct RonAssetSource {
    root: PathBuf,
    next_ticket: u64,
    pending: Vec<(LoadTicket, String)>,
}

impl RonAssetSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_ticket: 0,
            pending: Vec::new(),
        }
    }

    /// Directory assets are read from
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn load(&self, path: &str) -> Result<RegionAsset, AssetError> {
        let full_path = self.root.join(path);
        let contents = std::fs::read_to_string(&full_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(full_path.display().to_string())
            } else {
                AssetError::Io { path: full_path.clone(), source }
            }
        })?;
        let asset: RegionAsset = ron::from_str(&contents).map_err(|e| AssetError::Parse {
            path: full_path.clone(),
            message: e.to_string(),
        })?;
        asset.validate_hierarchy()?;
        Ok(asset)
    }
}

impl AssetSource for RonAssetSource {
    fn request(&mut self, path: &str) -> LoadTicket {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        log::debug!("Requested {path} from {} ({ticket:?})", self.root.display());
        self.pending.push((ticket, path.to_string()));
        ticket
    }

    fn poll(&mut self) -> Vec<LoadCompletion> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(ticket, path)| {
                let result = self.load(&path);
                LoadCompletion { ticket, path, result }
            })
            .collect()
    }
}
