//! Pool of free physical frames.

use super::error::{MemoryError, MemoryResult};
use super::FrameNumber;
use crate::config::POOL_MAX;

/// A bounded stack of free frames. Frames leave from the end most recently pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePool {
    frames: Vec<FrameNumber>,
    capacity: usize,
}

impl FramePool {
    /// Creates an empty pool holding at most `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a pool of frames `0..count`, so frame `count - 1` is handed out first.
    pub fn sequential(count: usize) -> MemoryResult<Self> {
        let full = MemoryError::PoolFull { capacity: POOL_MAX };
        if count > POOL_MAX {
            return Err(full);
        }
        let count = FrameNumber::try_from(count).map_err(|_| full)?;
        Self::from_frames(0..count)
    }

    /// Builds a pool bounded by [`POOL_MAX`], pushing frames in iteration order.
    pub fn from_frames<I>(frames: I) -> MemoryResult<Self>
    where
        I: IntoIterator<Item = FrameNumber>,
    {
        let mut pool = Self::new(POOL_MAX);
        for frame in frames {
            pool.push(frame)?;
        }
        Ok(pool)
    }

    pub fn push(&mut self, frame: FrameNumber) -> MemoryResult<()> {
        if self.frames.len() >= self.capacity {
            return Err(MemoryError::PoolFull {
                capacity: self.capacity,
            });
        }
        if self.frames.contains(&frame) {
            return Err(MemoryError::FrameAlreadyFree(frame));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<FrameNumber> {
        self.frames.pop()
    }

    pub fn contains(&self, frame: FrameNumber) -> bool {
        self.frames.contains(&frame)
    }

    pub fn frames(&self) -> &[FrameNumber] {
        &self.frames
    }

    /// Number of free frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
