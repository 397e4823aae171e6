//! Archive fixtures: build zip bodies the way the image endpoint returns them

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Minimal PNG signature followed by a marker, enough to tell images apart.
pub fn fake_png(marker: &str) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(marker.as_bytes());
    bytes
}

/// Zip the given `(name, bytes)` entries with deflate compression.
pub fn zip_entries(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(data).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// An archive holding `count` images named `image_{i}.png`.
pub fn image_archive(count: usize) -> Vec<u8> {
    let entries: Vec<(String, Vec<u8>)> = (0..count)
        .map(|i| (format!("image_{i}.png"), fake_png(&format!("img-{i}"))))
        .collect();
    let borrowed: Vec<(&str, Vec<u8>)> = entries
        .iter()
        .map(|(name, data)| (name.as_str(), data.clone()))
        .collect();
    zip_entries(&borrowed)
}
