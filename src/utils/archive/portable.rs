//! Streaming zip reader.
//!
//! Reads members front to back from their local headers through
//! `zip::read::read_zipfile_from_stream`, so the input only has to be `Read`.
//! Bytes ahead of the first member are skipped. Every member is checked
//! against its CRC while it is read.

use std::io::{Cursor, Read};

use super::{ArchiveBackend, ArchiveEntry};
use crate::error::ImageError;

const LOCAL_HEADER_SIGNATURE: &[u8] = b"PK\x03\x04";
const END_OF_DIRECTORY_SIGNATURE: &[u8] = b"PK\x05\x06";

/// Portable backend, the default on wasm targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableZipBackend;

impl ArchiveBackend for PortableZipBackend {
    fn name(&self) -> &'static str {
        "portable"
    }

    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ImageError> {
        let Some(start) = find(bytes, LOCAL_HEADER_SIGNATURE) else {
            // An archive without members is only its end record.
            return match find(bytes, END_OF_DIRECTORY_SIGNATURE) {
                Some(_) => Ok(Vec::new()),
                None => Err(ImageError::DecodeError(
                    "Invalid image archive: no zip members found".to_string(),
                )),
            };
        };

        let mut reader = Cursor::new(&bytes[start..]);
        let mut entries = Vec::new();
        while let Some(mut file) = zip::read::read_zipfile_from_stream(&mut reader)? {
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

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
