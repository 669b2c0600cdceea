//! Memory model for the page replacement simulator.
//!
//! This module holds all the state a replacement policy reads and mutates:
//!
//! - **PageTable**: One entry per logical page, either invalid or resident
//! - **FramePool**: Stack of free physical frames, popped from the end
//! - **ReferenceString**: Bounded sequence of logical page references
//! - **SimulatedClock**: Logical time used for arrival and recency ordering
//!
//! Every structure owns its length and rejects growth past its configured
//! limit instead of relying on caller-maintained counters.

pub mod error;
pub mod frame_pool;
pub mod page_table;
pub mod reference;
pub mod timestamp;

pub type PageNumber = usize;
pub type FrameNumber = u32;

pub use error::{MemoryError, MemoryResult};
pub use frame_pool::FramePool;
pub use page_table::{PageTable, PageTableEntry, RawEntry, Residency};
pub use reference::ReferenceString;
pub use timestamp::{SimulatedClock, Timestamp};
