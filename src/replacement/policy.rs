use super::PolicyKind;
use crate::memory::{
    FrameNumber, FramePool, MemoryError, MemoryResult, PageNumber, PageTable, ReferenceString,
    SimulatedClock, Timestamp,
};
use log::{debug, info, trace};
use std::fmt::Debug;

/// When the batch simulation moves its internal clock forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCadence {
    /// Only a fault advances time; a hit is stamped with the current time.
    FaultsOnly,
    /// Every processed reference advances time.
    EveryReference,
}

/// How a single reference was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The page was already resident.
    Hit { frame: FrameNumber },
    /// The page was loaded into a frame taken from the free pool.
    Loaded { frame: FrameNumber },
    /// The page took over the frame of an evicted victim.
    Replaced {
        frame: FrameNumber,
        victim: PageNumber,
    },
}

impl Access {
    pub fn frame(&self) -> FrameNumber {
        match *self {
            Access::Hit { frame } | Access::Loaded { frame } | Access::Replaced { frame, .. } => {
                frame
            }
        }
    }

    pub fn is_fault(&self) -> bool {
        !matches!(self, Access::Hit { .. })
    }

    pub fn victim(&self) -> Option<PageNumber> {
        match *self {
            Access::Replaced { victim, .. } => Some(victim),
            _ => None,
        }
    }
}

/// A page replacement policy operating over a page table and frame pool.
///
/// Implementors only decide which resident page to evict and how the batch
/// clock advances. Hit and load bookkeeping is shared.
pub trait ReplacementPolicy: Send + Sync + Debug {
    fn kind(&self) -> PolicyKind;

    /// Select a resident page to evict. Returns None if no page is resident.
    fn select_victim(&self, table: &PageTable) -> Option<PageNumber>;

    /// Clock behaviour of [`ReplacementPolicy::count_page_faults`].
    fn clock_cadence(&self) -> ClockCadence;

    /// Resolves one reference at the caller-supplied time `now`.
    ///
    /// `page` must index `table`, no free frame may also be resident, and the
    /// free pool and resident set together must be able to supply a frame.
    /// All three are checked and reported as errors before any state changes.
    fn access(
        &self,
        table: &mut PageTable,
        page: PageNumber,
        pool: &mut FramePool,
        now: Timestamp,
    ) -> MemoryResult<Access> {
        let resident = table.is_resident(page)?;
        table.check_pool(pool)?;

        if resident {
            let frame = table.touch(page, now)?;
            trace!("{}: hit page {} in frame {} at {}", self.kind(), page, frame, now);
            return Ok(Access::Hit { frame });
        }

        if let Some(frame) = pool.pop() {
            table.install(page, frame, now)?;
            debug!("{}: loaded page {} into free frame {} at {}", self.kind(), page, frame, now);
            return Ok(Access::Loaded { frame });
        }

        let victim = self.select_victim(table).ok_or(MemoryError::NoVictim)?;
        let frame = table.invalidate(victim)?;
        table.install(page, frame, now)?;
        debug!(
            "{}: evicted page {} from frame {} for page {} at {}",
            self.kind(),
            victim,
            frame,
            page,
            now
        );
        Ok(Access::Replaced { frame, victim })
    }

    /// Processes one reference and returns the frame now holding `page`.
    fn process_access(
        &self,
        table: &mut PageTable,
        page: PageNumber,
        pool: &mut FramePool,
        now: Timestamp,
    ) -> MemoryResult<FrameNumber> {
        self.access(table, page, pool, now).map(|access| access.frame())
    }

    /// Runs a whole reference string and returns the number of page faults.
    ///
    /// Owns its clock, starting at 1 and advancing per [`ClockCadence`]. Does
    /// not go through [`ReplacementPolicy::access`]. Every reference and the
    /// pool are validated before the table is touched.
    fn count_page_faults(
        &self,
        table: &mut PageTable,
        references: &ReferenceString,
        pool: &mut FramePool,
    ) -> MemoryResult<usize> {
        references.validate(table)?;
        table.check_pool(pool)?;

        let cadence = self.clock_cadence();
        let mut clock = SimulatedClock::new();
        let mut faults = 0;

        for page in references.iter() {
            let now = clock.now();

            if table.is_resident(page)? {
                table.touch(page, now)?;
                if cadence == ClockCadence::EveryReference {
                    clock.advance();
                }
                continue;
            }

            let frame = match pool.pop() {
                Some(frame) => frame,
                None => {
                    let victim = self.select_victim(table).ok_or(MemoryError::NoVictim)?;
                    trace!("{}: batch evicting page {} at {}", self.kind(), victim, now);
                    table.invalidate(victim)?
                }
            };
            table.install(page, frame, now)?;
            faults += 1;
            clock.advance();
        }

        info!(
            "{}: {} faults over {} references",
            self.kind(),
            faults,
            references.len()
        );
        Ok(faults)
    }
}
