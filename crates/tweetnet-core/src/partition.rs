//! Static partitioning of the archive list across a fixed worker count

use crate::error::IngestError;

/// Split `items` into exactly `workers` contiguous chunks.
///
/// Every worker gets `len / workers` items except the last, which also takes
/// the remainder. Concatenating the chunks in worker order reproduces `items`.
/// With more workers than items the leading chunks are empty.
pub fn partition<T>(items: &[T], workers: usize) -> Result<Vec<&[T]>, IngestError> {
    if workers == 0 {
        return Err(IngestError::config("worker count must be at least 1"));
    }

    let per_worker = items.len() / workers;
    let chunks = (0..workers)
        .map(|rank| {
            let start = rank * per_worker;
            let end = if rank == workers - 1 {
                items.len()
            } else {
                start + per_worker
            };
            &items[start..end]
        })
        .collect();
    Ok(chunks)
}
