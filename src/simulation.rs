//! Simulation sessions and multi-policy comparisons.
//!
//! A [`Simulation`] owns one private page table and frame pool, so independent
//! simulations never share state.

use crate::config::SimulatorConfig;
use crate::memory::{
    FramePool, MemoryResult, PageNumber, PageTable, ReferenceString, SimulatedClock,
};
use crate::replacement::{Access, PolicyKind, ReplacementPolicy};
use log::info;

/// Totals collected while stepping through a reference string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub references: usize,
    pub hits: usize,
    pub faults: usize,
    pub evictions: usize,
}

impl SimulationStats {
    fn record(&mut self, access: &Access) {
        self.references += 1;
        match access {
            Access::Hit { .. } => self.hits += 1,
            Access::Loaded { .. } => self.faults += 1,
            Access::Replaced { .. } => {
                self.faults += 1;
                self.evictions += 1;
            }
        }
    }
}

/// An owning, step-driven simulation with its own clock.
///
/// Each call to [`Simulation::access`] is stamped with the current time and
/// then advances the clock by one.
#[derive(Debug)]
pub struct Simulation {
    table: PageTable,
    pool: FramePool,
    policy: Box<dyn ReplacementPolicy>,
    clock: SimulatedClock,
    stats: SimulationStats,
}

impl Simulation {
    pub fn new(table: PageTable, pool: FramePool, policy: Box<dyn ReplacementPolicy>) -> Self {
        Self {
            table,
            pool,
            policy,
            clock: SimulatedClock::new(),
            stats: SimulationStats::default(),
        }
    }

    pub fn from_config(config: &SimulatorConfig, kind: PolicyKind) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::new(config.build_table()?, config.build_pool()?, kind.policy()))
    }

    pub fn access(&mut self, page: PageNumber) -> MemoryResult<Access> {
        let now = self.clock.now();
        let access = self
            .policy
            .access(&mut self.table, page, &mut self.pool, now)?;
        self.clock.advance();
        self.stats.record(&access);
        Ok(access)
    }

    /// Steps through every reference, returning the resolution of each.
    pub fn run(&mut self, references: &ReferenceString) -> MemoryResult<Vec<Access>> {
        references.validate(&self.table)?;
        references.iter().map(|page| self.access(page)).collect()
    }

    pub fn table(&self) -> &PageTable {
        &self.table
    }

    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    pub fn kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }
}

/// Fault count of one policy's batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyReport {
    pub policy: PolicyKind,
    pub references: usize,
    pub faults: usize,
}

impl PolicyReport {
    pub fn hits(&self) -> usize {
        self.references - self.faults
    }

    pub fn fault_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.faults as f64 / self.references as f64
        }
    }
}

/// Runs the batch fault count of each policy in `policies` on fresh state.
pub fn compare_policies(
    config: &SimulatorConfig,
    policies: &[PolicyKind],
    references: &ReferenceString,
) -> MemoryResult<Vec<PolicyReport>> {
    config.validate()?;

    policies
        .iter()
        .map(|&kind| -> MemoryResult<PolicyReport> {
            let mut table = config.build_table()?;
            let mut pool = config.build_pool()?;
            let faults = kind
                .policy()
                .count_page_faults(&mut table, references, &mut pool)?;
            info!("{}: {} of {} references faulted", kind, faults, references.len());
            Ok(PolicyReport {
                policy: kind,
                references: references.len(),
                faults,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryError;

    #[test]
    fn test_simulation_stats() {
        let config = SimulatorConfig::new(3, 2);
        let mut sim = Simulation::from_config(&config, PolicyKind::Lru).unwrap();
        let refs = ReferenceString::new(vec![0, 1, 0, 2, 2]).unwrap();

        let accesses = sim.run(&refs).unwrap();
        assert_eq!(accesses.len(), 5);
        assert_eq!(accesses[3].victim(), Some(1));
        assert_eq!(
            sim.stats(),
            SimulationStats {
                references: 5,
                hits: 2,
                faults: 3,
                evictions: 1,
            }
        );
        assert_eq!(sim.kind(), PolicyKind::Lru);
    }

    #[test]
    fn test_simulation_clock_advances_per_access() {
        let config = SimulatorConfig::new(2, 2);
        let mut sim = Simulation::from_config(&config, PolicyKind::Fifo).unwrap();
        sim.access(0).unwrap();
        sim.access(0).unwrap();
        sim.access(1).unwrap();

        let page0 = sim.table().entry(0).unwrap().raw();
        assert_eq!(page0.arrival_timestamp, 1);
        assert_eq!(page0.last_access_timestamp, 2);
        assert_eq!(sim.table().entry(1).unwrap().raw().arrival_timestamp, 3);
        assert!(sim.pool().is_empty());
    }

    #[test]
    fn test_simulation_rejects_bad_reference() {
        let config = SimulatorConfig::new(2, 1);
        let mut sim = Simulation::from_config(&config, PolicyKind::Lfu).unwrap();
        let refs = ReferenceString::new(vec![0, 4]).unwrap();

        assert!(matches!(
            sim.run(&refs),
            Err(MemoryError::InvalidReference { index: 1, .. })
        ));
        assert_eq!(sim.stats().references, 0);
    }

    #[test]
    fn test_compare_policies() {
        let config = SimulatorConfig::new(3, 2);
        let refs = ReferenceString::new(vec![0, 1, 0, 2, 0]).unwrap();

        let reports = compare_policies(&config, &PolicyKind::ALL, &refs).unwrap();
        let faults: Vec<_> = reports.iter().map(|r| (r.policy, r.faults)).collect();

        // FIFO throws out page 0 at the fourth reference and faults again on it.
        assert_eq!(
            faults,
            vec![
                (PolicyKind::Fifo, 4),
                (PolicyKind::Lfu, 3),
                (PolicyKind::Lru, 3),
            ]
        );
        assert_eq!(reports[1].hits(), 2);
        assert!((reports[0].fault_rate() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fault_rate_empty() {
        let report = PolicyReport {
            policy: PolicyKind::Fifo,
            references: 0,
            faults: 0,
        };
        assert_eq!(report.fault_rate(), 0.0);
    }
}
