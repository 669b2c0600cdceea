//! Page replacement policies.
//!
//! Each policy offers two independent operations:
//!
//! - **Step** (`process_access`): resolve one reference at a caller-owned time
//! - **Batch** (`count_page_faults`): run a whole reference string with an
//!   internal clock starting at 1 and return the fault count
//!
//! The batch clock cadence differs per policy. FIFO advances time only on a
//! fault, so a hit shares its timestamp with the next load. LFU and LRU
//! advance on every reference.

pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod policy;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use policy::{Access, ClockCadence, ReplacementPolicy};

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fifo,
    Lfu,
    Lru,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Fifo, PolicyKind::Lfu, PolicyKind::Lru];

    /// Returns the engine implementing this policy.
    pub fn policy(&self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy),
            PolicyKind::Lfu => Box::new(LfuPolicy),
            PolicyKind::Lru => Box::new(LruPolicy),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lfu => "LFU",
            PolicyKind::Lru => "LRU",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lfu" => Ok(PolicyKind::Lfu),
            "lru" => Ok(PolicyKind::Lru),
            other => Err(format!("Unknown replacement policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_round_trip_names() {
        for kind in PolicyKind::ALL {
            let parsed: PolicyKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.policy().kind(), kind);
        }
    }

    #[test]
    fn test_policy_kind_unknown() {
        assert!("clock".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn test_clock_cadence_per_policy() {
        assert_eq!(FifoPolicy.clock_cadence(), ClockCadence::FaultsOnly);
        assert_eq!(LfuPolicy.clock_cadence(), ClockCadence::EveryReference);
        assert_eq!(LruPolicy.clock_cadence(), ClockCadence::EveryReference);
    }
}
