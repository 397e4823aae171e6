//! Image archive decoding.
//!
//! The service answers a successful generation with a zip archive holding one
//! PNG per sample. Parsing is delegated to an [`ArchiveBackend`]; two
//! interchangeable backends ship with the crate:
//!
//! - [`ZipCrateBackend`]: host-native, built on the `zip` crate.
//! - [`PortableZipBackend`]: a forward-only reader over the `zip` crate's
//!   stream API, the default on wasm targets.
//!
//! The backend is chosen when the decoder is constructed, never inside
//! [`ArchiveDecoder::extract_images`].

mod native;
mod portable;

pub use native::ZipCrateBackend;
pub use portable::PortableZipBackend;

use std::fmt;
use std::sync::Arc;

use crate::defaults::IMAGE_ENTRY_EXTENSION;
use crate::error::ImageError;

/// A decompressed archive member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_dir: bool,
    pub data: Vec<u8>,
}

/// Parses an archive buffer into its entries, in archive order.
pub trait ArchiveBackend: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fails with [`ImageError::DecodeError`] if `bytes` is not a valid archive.
    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ImageError>;
}

/// Extracts image buffers from a response archive.
#[derive(Debug, Clone)]
pub struct ArchiveDecoder {
    backend: Arc<dyn ArchiveBackend>,
}

impl ArchiveDecoder {
    pub fn new(backend: Arc<dyn ArchiveBackend>) -> Self {
        Self { backend }
    }

    /// The backend in use.
    pub fn backend(&self) -> &dyn ArchiveBackend {
        self.backend.as_ref()
    }

    /// Contents of every non-directory `.png` entry, in archive order.
    pub fn extract_images(&self, bytes: &[u8]) -> Result<Vec<Vec<u8>>, ImageError> {
        let entries = self.backend.read_entries(bytes)?;
        let total = entries.len();
        let images: Vec<Vec<u8>> = entries
            .into_iter()
            .filter(|entry| !entry.is_dir && entry.name.ends_with(IMAGE_ENTRY_EXTENSION))
            .map(|entry| entry.data)
            .collect();
        tracing::trace!(
            target: "novelai_image::archive",
            backend = self.backend.name(),
            entries = total,
            images = images.len(),
            "archive decoded"
        );
        Ok(images)
    }
}

impl Default for ArchiveDecoder {
    fn default() -> Self {
        Self::new(default_backend())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_backend() -> Arc<dyn ArchiveBackend> {
    Arc::new(ZipCrateBackend)
}

#[cfg(target_arch = "wasm32")]
fn default_backend() -> Arc<dyn ArchiveBackend> {
    Arc::new(PortableZipBackend)
}
