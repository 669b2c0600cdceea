//! Per-page residency metadata.
//!
//! Each logical page is either `Invalid` or `Resident` with its frame and
//! bookkeeping. The C-style `-1` sentinel layout is only available through
//! [`RawEntry`], a read-only view derived from an entry.

use super::error::{MemoryError, MemoryResult};
use super::{FrameNumber, FramePool, PageNumber, Timestamp};
use crate::config::TABLE_MAX;
use std::collections::HashMap;

/// Bookkeeping for a page that currently occupies a physical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residency {
    /// Physical frame holding the page.
    pub frame: FrameNumber,
    /// Time at which the page was most recently loaded.
    pub arrival: Timestamp,
    /// Time of the most recent hit or load.
    pub last_access: Timestamp,
    /// Accesses since the page was last loaded, starting at 1.
    pub reference_count: u32,
}

impl Residency {
    /// Bookkeeping for a page loaded into `frame` at `now`.
    pub fn loaded(frame: FrameNumber, now: Timestamp) -> Self {
        Self {
            frame,
            arrival: now,
            last_access: now,
            reference_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageTableEntry {
    #[default]
    Invalid,
    Resident(Residency),
}

impl PageTableEntry {
    pub fn is_resident(&self) -> bool {
        matches!(self, PageTableEntry::Resident(_))
    }

    pub fn residency(&self) -> Option<&Residency> {
        match self {
            PageTableEntry::Resident(residency) => Some(residency),
            PageTableEntry::Invalid => None,
        }
    }

    /// Returns the sentinel-encoded view of this entry.
    pub fn raw(&self) -> RawEntry {
        RawEntry::from(self)
    }
}

/// Sentinel-encoded view of a page table entry, where `-1` means "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry {
    pub is_valid: i64,
    pub frame_number: i64,
    pub reference_count: i64,
    pub arrival_timestamp: i64,
    pub last_access_timestamp: i64,
}

impl RawEntry {
    pub const INVALID: RawEntry = RawEntry {
        is_valid: 0,
        frame_number: -1,
        reference_count: -1,
        arrival_timestamp: -1,
        last_access_timestamp: -1,
    };
}

impl From<&PageTableEntry> for RawEntry {
    fn from(entry: &PageTableEntry) -> Self {
        match entry {
            PageTableEntry::Invalid => RawEntry::INVALID,
            PageTableEntry::Resident(r) => RawEntry {
                is_valid: 1,
                frame_number: i64::from(r.frame),
                reference_count: i64::from(r.reference_count),
                arrival_timestamp: i64::try_from(r.arrival.value()).unwrap_or(i64::MAX),
                last_access_timestamp: i64::try_from(r.last_access.value()).unwrap_or(i64::MAX),
            },
        }
    }
}

/// A fixed-size page table indexed by page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Creates a table of `size` invalid entries, bounded by [`TABLE_MAX`].
    pub fn new(size: usize) -> MemoryResult<Self> {
        Self::with_limit(size, TABLE_MAX)
    }

    pub fn with_limit(size: usize, max: usize) -> MemoryResult<Self> {
        if size > max {
            return Err(MemoryError::TableTooLarge { size, max });
        }
        Ok(Self {
            entries: vec![PageTableEntry::Invalid; size],
        })
    }

    /// Builds a table from externally prepared entries.
    ///
    /// Fails if two resident entries claim the same frame.
    pub fn from_entries(entries: Vec<PageTableEntry>) -> MemoryResult<Self> {
        if entries.len() > TABLE_MAX {
            return Err(MemoryError::TableTooLarge {
                size: entries.len(),
                max: TABLE_MAX,
            });
        }

        let mut owners: HashMap<FrameNumber, PageNumber> = HashMap::new();
        for (page, entry) in entries.iter().enumerate() {
            if let Some(residency) = entry.residency() {
                if let Some(&first) = owners.get(&residency.frame) {
                    return Err(MemoryError::DuplicateFrame {
                        frame: residency.frame,
                        first,
                        second: page,
                    });
                }
                owners.insert(residency.frame, page);
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }

    pub fn entry(&self, page: PageNumber) -> MemoryResult<&PageTableEntry> {
        self.entries.get(page).ok_or(MemoryError::PageOutOfRange {
            page,
            table_size: self.entries.len(),
        })
    }

    pub fn is_resident(&self, page: PageNumber) -> MemoryResult<bool> {
        Ok(self.entry(page)?.is_resident())
    }

    /// Resident pages in ascending page order.
    pub fn resident(&self) -> impl Iterator<Item = (PageNumber, &Residency)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(page, entry)| entry.residency().map(|r| (page, r)))
    }

    pub fn resident_count(&self) -> usize {
        self.resident().count()
    }

    /// Records a hit on a resident page and returns its frame.
    pub fn touch(&mut self, page: PageNumber, now: Timestamp) -> MemoryResult<FrameNumber> {
        match self.entry_mut(page)? {
            PageTableEntry::Resident(residency) => {
                residency.reference_count = residency.reference_count.saturating_add(1);
                residency.last_access = now;
                Ok(residency.frame)
            }
            PageTableEntry::Invalid => Err(MemoryError::PageNotResident(page)),
        }
    }

    /// Loads `page` into `frame`, overwriting whatever the entry held.
    pub fn install(
        &mut self,
        page: PageNumber,
        frame: FrameNumber,
        now: Timestamp,
    ) -> MemoryResult<()> {
        *self.entry_mut(page)? = PageTableEntry::Resident(Residency::loaded(frame, now));
        Ok(())
    }

    /// Resets a resident page to `Invalid` and returns the frame it held.
    pub fn invalidate(&mut self, page: PageNumber) -> MemoryResult<FrameNumber> {
        let entry = self.entry_mut(page)?;
        let current = *entry;
        match current {
            PageTableEntry::Resident(residency) => {
                *entry = PageTableEntry::Invalid;
                Ok(residency.frame)
            }
            PageTableEntry::Invalid => Err(MemoryError::PageNotResident(page)),
        }
    }

    /// Marks every entry invalid.
    pub fn reset(&mut self) {
        self.entries.fill(PageTableEntry::Invalid);
    }

    /// Resident page holding `frame`, if any.
    pub fn holder_of(&self, frame: FrameNumber) -> Option<PageNumber> {
        self.resident()
            .find(|(_, residency)| residency.frame == frame)
            .map(|(page, _)| page)
    }

    /// Fails if any frame in `pool` is also held by a resident page.
    pub fn check_pool(&self, pool: &FramePool) -> MemoryResult<()> {
        match pool
            .frames()
            .iter()
            .find(|&&frame| self.holder_of(frame).is_some())
        {
            Some(&frame) => Err(MemoryError::FrameBothFreeAndResident(frame)),
            None => Ok(()),
        }
    }

    /// Returns the first resident page minimising `key`, scanning in page order.
    pub fn min_resident_by_key<K, F>(&self, mut key: F) -> Option<PageNumber>
    where
        K: Ord,
        F: FnMut(&Residency) -> K,
    {
        self.resident()
            .min_by_key(|&(_, residency)| key(residency))
            .map(|(page, _)| page)
    }

    fn entry_mut(&mut self, page: PageNumber) -> MemoryResult<&mut PageTableEntry> {
        let table_size = self.entries.len();
        self.entries
            .get_mut(page)
            .ok_or(MemoryError::PageOutOfRange { page, table_size })
    }
}
