//! Memory model error types.

use super::{FrameNumber, PageNumber};
use thiserror::Error;

/// Contract violations detected by the page table, frame pool and policy engines.
///
/// A page fault is never reported through this type; faults are the expected
/// outcome of a miss and are counted, not raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Page {page} is out of range for a table of {table_size} entries")]
    PageOutOfRange { page: PageNumber, table_size: usize },

    #[error("Page table of {size} entries exceeds the maximum of {max}")]
    TableTooLarge { size: usize, max: usize },

    #[error("Frame pool is full: capacity is {capacity}")]
    PoolFull { capacity: usize },

    #[error("Frame {0} is already in the free pool")]
    FrameAlreadyFree(FrameNumber),

    #[error("Frame {frame} is held by both page {first} and page {second}")]
    DuplicateFrame {
        frame: FrameNumber,
        first: PageNumber,
        second: PageNumber,
    },

    #[error("Frame {0} is both free and assigned to a resident page")]
    FrameBothFreeAndResident(FrameNumber),

    #[error("Reference string of length {len} exceeds the maximum of {max}")]
    ReferenceTooLong { len: usize, max: usize },

    #[error("Reference {index} names page {page}, outside a table of {table_size} entries")]
    InvalidReference {
        index: usize,
        page: PageNumber,
        table_size: usize,
    },

    #[error("Page {0} is not resident")]
    PageNotResident(PageNumber),

    #[error("No free frame and no resident page to evict")]
    NoVictim,
}

/// Result type for memory model operations.
pub type MemoryResult<T> = Result<T, MemoryError>;
