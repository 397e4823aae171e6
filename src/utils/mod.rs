//! Utility modules
//!
//! - `archive`: zip response decoding with interchangeable backends
//! - `cancel`: cancellation handles for in-flight requests
//! - `encoding`: base64 / data URL helpers
//! - `entropy`: injectable seed and correlation id sources
//! - `mime`: MIME sniffing of image buffers

pub mod archive;
pub mod cancel;
pub mod encoding;
pub mod entropy;
pub mod mime;

pub use archive::{ArchiveBackend, ArchiveDecoder, ArchiveEntry, PortableZipBackend, ZipCrateBackend};
pub use cancel::CancelHandle;
pub use encoding::{to_base64, to_data_url};
pub use entropy::{CorrelationIdSource, FixedCorrelationId, FixedSeed, SeedSource, ThreadRngEntropy};
