//! Region assets
//!
//! Geometry arrives asynchronously through an [`AssetSource`]: the core
//! requests a path, gets a [`LoadTicket`] back, and polls for completions
//! at the start of every tick. Decoding meshes is the renderer's business;
//! a [`RegionAsset`] only carries what the world-state core needs.

pub mod memory_source;
pub mod region_asset;
pub mod ron_source;

pub use memory_source::MemoryAssetSource;
pub use region_asset::{
    AnchorBinding, AnchorRole, ManifestError, NodeSpec, RegionAsset, RegionInstance,
};
pub use ron_source::RonAssetSource;

use std::path::PathBuf;

/// Handle identifying one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// A finished load
#[derive(Debug)]
pub struct LoadCompletion {
    /// Ticket returned by the matching request
    pub ticket: LoadTicket,
    /// Requested path
    pub path: String,
    /// Decoded asset or the reason it could not be produced
    pub result: Result<RegionAsset, AssetError>,
}

/// Asynchronous asset loader collaborator
pub trait AssetSource {
    /// Start loading `path`
    fn request(&mut self, path: &str) -> LoadTicket;

    /// Collect loads that finished since the last poll
    fn poll(&mut self) -> Vec<LoadCompletion>;
}

/// Asset loading errors
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid region asset
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// No asset is known under this path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset's node hierarchy is inconsistent
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
