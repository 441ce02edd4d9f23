//! Cart persistence port.
//!
//! The cart store persists its contents through [`CartStorage`], keeping
//! the store itself independent of where the bytes land. The shipped
//! implementation writes a JSON file; tests use the in-memory one.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::stores::cart::CartItem;

/// Where the cart persists its contents between sessions.
pub trait CartStorage: Send + Sync {
    /// Load the previously saved cart, or an empty one if nothing (or
    /// nothing readable) was saved.
    fn load(&self) -> Vec<CartItem>;

    /// Save the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the contents cannot be written.
    fn save(&self, items: &[CartItem]) -> io::Result<()>;
}

/// JSON-file-backed cart storage.
#[derive(Debug)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    /// Persist the cart at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Vec<CartItem> {
        let Ok(bytes) = std::fs::read(&self.path) else {
            return Vec::new();
        };

        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                // A corrupt file means starting over with an empty cart,
                // not failing the whole UI.
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable cart");
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[CartItem]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec(items).map_err(io::Error::other)?;
        std::fs::write(&self.path, bytes)
    }
}

/// In-memory cart storage, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    items: Mutex<Vec<CartItem>>,
}

impl MemoryCartStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Vec<CartItem> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }

    fn save(&self, items: &[CartItem]) -> io::Result<()> {
        if let Ok(mut guard) = self.items.lock() {
            guard.clone_from(&items.to_vec());
        }
        Ok(())
    }
}
