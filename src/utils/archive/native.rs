//! Backend built on the `zip` crate.

use std::io::{Cursor, Read};

use super::{ArchiveBackend, ArchiveEntry};
use crate::error::ImageError;

/// Host-native backend, the default outside wasm.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCrateBackend;

impl ArchiveBackend for ZipCrateBackend {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ImageError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let name = file.name().to_string();
            let is_dir = file.is_dir();
            let mut data = Vec::new();
            if !is_dir {
                file.read_to_end(&mut data).map_err(|e| {
                    ImageError::DecodeError(format!("Failed to read archive entry '{name}': {e}"))
                })?;
            }
            entries.push(ArchiveEntry { name, is_dir, data });
        }
        Ok(entries)
    }
}
