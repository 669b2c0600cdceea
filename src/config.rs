//! Simulator configuration and capacity limits.

use crate::memory::{FrameNumber, FramePool, MemoryError, MemoryResult, PageTable};

/// Maximum number of page table entries.
pub const TABLE_MAX: usize = 100;

/// Maximum number of frames in a frame pool.
pub const POOL_MAX: usize = 100;

/// Maximum length of a reference string.
pub const REFERENCE_MAX: usize = 100;

/// Capacity limits applied when building simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub table_max: usize,
    pub pool_max: usize,
    pub reference_max: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            table_max: TABLE_MAX,
            pool_max: POOL_MAX,
            reference_max: REFERENCE_MAX,
        }
    }
}

/// Shape of a single simulation run.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Number of logical pages in the page table.
    pub table_size: usize,
    /// Number of physical frames initially free.
    pub frame_count: usize,
    pub limits: Limits,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            table_size: 8,
            frame_count: 3,
            limits: Limits::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn new(table_size: usize, frame_count: usize) -> Self {
        SimulatorConfig {
            table_size,
            frame_count,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> MemoryResult<()> {
        if self.table_size > self.limits.table_max {
            return Err(MemoryError::TableTooLarge {
                size: self.table_size,
                max: self.limits.table_max,
            });
        }
        if self.frame_count > self.limits.pool_max {
            return Err(MemoryError::PoolFull {
                capacity: self.limits.pool_max,
            });
        }
        Ok(())
    }

    /// A page table of `table_size` invalid entries.
    pub fn build_table(&self) -> MemoryResult<PageTable> {
        PageTable::with_limit(self.table_size, self.limits.table_max)
    }

    /// A frame pool holding frames `0..frame_count`.
    pub fn build_pool(&self) -> MemoryResult<FramePool> {
        self.validate()?;
        let count = FrameNumber::try_from(self.frame_count).map_err(|_| MemoryError::PoolFull {
            capacity: self.limits.pool_max,
        })?;

        let mut pool = FramePool::new(self.limits.pool_max);
        for frame in 0..count {
            pool.push(frame)?;
        }
        Ok(pool)
    }
}
