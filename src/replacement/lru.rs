use super::policy::{ClockCadence, ReplacementPolicy};
use super::PolicyKind;
use crate::memory::{PageNumber, PageTable};

/// Least recently used: evicts the resident page whose last hit or load is oldest.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn select_victim(&self, table: &PageTable) -> Option<PageNumber> {
        table.min_resident_by_key(|residency| residency.last_access)
    }

    fn clock_cadence(&self) -> ClockCadence {
        ClockCadence::EveryReference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{
        FramePool, PageTableEntry, RawEntry, ReferenceString, Residency, Timestamp,
    };
    use crate::replacement::{Access, FifoPolicy};

    #[test]
    fn test_evicts_least_recently_used() {
        let mut table = PageTable::new(3).unwrap();
        let mut pool = FramePool::sequential(2).unwrap();
        let t = Timestamp::new;

        LruPolicy.process_access(&mut table, 0, &mut pool, t(1)).unwrap();
        LruPolicy.process_access(&mut table, 1, &mut pool, t(2)).unwrap();
        assert_eq!(
            LruPolicy.access(&mut table, 0, &mut pool, t(3)).unwrap(),
            Access::Hit { frame: 1 }
        );

        let access = LruPolicy.access(&mut table, 2, &mut pool, t(4)).unwrap();
        assert_eq!(access, Access::Replaced { frame: 0, victim: 1 });

        let page0 = table.entry(0).unwrap().raw();
        assert_eq!(page0.last_access_timestamp, 3);
        assert_eq!(page0.arrival_timestamp, 1);
    }

    fn last_victim(policy: &dyn ReplacementPolicy, pages: &[PageNumber]) -> Option<PageNumber> {
        let mut table = PageTable::new(3).unwrap();
        let mut pool = FramePool::sequential(2).unwrap();
        let mut last = None;
        for (t, &page) in pages.iter().enumerate() {
            let now = Timestamp::new(t as u64 + 1);
            last = Some(policy.access(&mut table, page, &mut pool, now).unwrap());
        }
        last.and_then(|access| access.victim())
    }

    #[test]
    fn test_differs_from_fifo_on_recent_hit() {
        assert_eq!(last_victim(&LruPolicy, &[0, 1, 0, 2]), Some(1));
        assert_eq!(last_victim(&FifoPolicy, &[0, 1, 0, 2]), Some(0));
    }

    #[test]
    fn test_tie_prefers_lowest_page() {
        let resident = |frame| {
            PageTableEntry::Resident(Residency {
                frame,
                arrival: Timestamp::new(1),
                last_access: Timestamp::new(4),
                reference_count: 1,
            })
        };
        let table =
            PageTable::from_entries(vec![PageTableEntry::Invalid, resident(0), resident(1)])
                .unwrap();

        for _ in 0..10 {
            assert_eq!(LruPolicy.select_victim(&table), Some(1));
        }
    }

    #[test]
    fn test_count_faults_keeps_recent_page() {
        let mut table = PageTable::new(3).unwrap();
        let mut pool = FramePool::sequential(2).unwrap();
        let refs = ReferenceString::new(vec![0, 1, 0, 2]).unwrap();

        let faults = LruPolicy.count_page_faults(&mut table, &refs, &mut pool).unwrap();
        assert_eq!(faults, 3);
        assert!(table.is_resident(0).unwrap());
        assert!(!table.is_resident(1).unwrap());
    }

    #[test]
    fn test_batch_hit_advances_clock() {
        let mut table = PageTable::new(3).unwrap();
        let mut pool = FramePool::sequential(2).unwrap();
        let refs = ReferenceString::new(vec![0, 0, 1]).unwrap();

        LruPolicy.count_page_faults(&mut table, &refs, &mut pool).unwrap();

        assert_eq!(table.entry(0).unwrap().raw().last_access_timestamp, 2);
        assert_eq!(table.entry(1).unwrap().raw().arrival_timestamp, 3);
    }

    #[test]
    fn test_batch_victim_found_by_table_scan() {
        let mut table = PageTable::new(3).unwrap();
        let mut pool = FramePool::sequential(2).unwrap();
        let refs = ReferenceString::new(vec![0, 1, 0, 1, 0, 2, 1]).unwrap();

        let faults = LruPolicy.count_page_faults(&mut table, &refs, &mut pool).unwrap();
        assert_eq!(faults, 4);

        assert_eq!(table.entry(0).unwrap().raw(), RawEntry::INVALID);
        let page1 = table.entry(1).unwrap().raw();
        assert_eq!(page1.frame_number, 1);
        assert_eq!(page1.arrival_timestamp, 7);
        let page2 = table.entry(2).unwrap().raw();
        assert_eq!(page2.frame_number, 0);
        assert_eq!(page2.last_access_timestamp, 6);
    }
}
