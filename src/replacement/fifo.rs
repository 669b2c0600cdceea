use super::policy::{ClockCadence, ReplacementPolicy};
use super::PolicyKind;
use crate::memory::{PageNumber, PageTable};

/// First-in first-out: evicts the resident page with the oldest arrival.
///
/// Reference counts and access times play no part in the choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn select_victim(&self, table: &PageTable) -> Option<PageNumber> {
        table.min_resident_by_key(|residency| residency.arrival)
    }

    fn clock_cadence(&self) -> ClockCadence {
        ClockCadence::FaultsOnly
    }
}
