//! tweetnet core - shared infrastructure for tweet archive pipelines
//!
//! Domain-free pieces: archive discovery and decompression, the line loop
//! that feeds accumulators, static work partitioning, logging and progress.

pub mod accumulator;
pub mod error;
pub mod logging;
pub mod partition;
pub mod progress;
pub mod stream;

// Re-exports for convenience
pub use accumulator::{Accumulator, Line, LineStats, process_lines};
pub use error::IngestError;
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use partition::partition;
pub use progress::{ProgressContext, SharedProgress, fmt_num, start_archive};
pub use stream::{
    ArchiveReader, ByteCounter, Compression, discover_archives, open_archive,
};
