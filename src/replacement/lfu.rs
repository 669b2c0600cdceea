use super::policy::{ClockCadence, ReplacementPolicy};
use super::PolicyKind;
use crate::memory::{PageNumber, PageTable};

/// Least frequently used: evicts the resident page with the lowest reference
/// count, breaking ties by earliest arrival and then by lowest page number.
#[derive(Debug, Default, Clone, Copy)]
pub struct LfuPolicy;

impl ReplacementPolicy for LfuPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn select_victim(&self, table: &PageTable) -> Option<PageNumber> {
        table.min_resident_by_key(|residency| (residency.reference_count, residency.arrival))
    }

    fn clock_cadence(&self) -> ClockCadence {
        ClockCadence::EveryReference
    }
}
