/// Probe sequence generator for the open-addressing table.
///
/// A strategy maps `(capacity, key, attempt)` to a slot index. A table picks
/// one strategy at construction and keeps it for its whole lifetime; probing
/// a table with a different strategy than it was filled with corrupts
/// lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeStrategy {
    /// Visits `(key + attempt) mod capacity`: a single deterministic run of
    /// neighboring slots, prone to primary clustering.
    Linear,
    /// Visits `(5 * (key mod capacity + attempt) + 1) mod capacity`. For a
    /// power-of-two capacity this is a full-period linear congruential
    /// transform: attempts `0..capacity` visit every slot exactly once.
    #[default]
    Geometric,
}

impl ProbeStrategy {
    /// Returns the slot index probed for `key` on the given `attempt`.
    ///
    /// Wrapping arithmetic is exact here: the final index is reduced modulo
    /// a power of two, which divides `2^64`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of two (which also excludes 0);
    /// the full-period guarantee of [`ProbeStrategy::Geometric`] holds for
    /// power-of-two capacities only.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn slot(self, capacity: usize, key: u64, attempt: u64) -> usize {
        assert!(capacity.is_power_of_two(), "capacity must be a power of two");
        let mask = (capacity as u64).saturating_sub(1);

        let index = match self {
            Self::Linear => key.wrapping_add(attempt) & mask,
            Self::Geometric => {
                let origin = key & mask;
                origin.wrapping_add(attempt).wrapping_mul(5).wrapping_add(1) & mask
            }
        };

        index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_indexes_stay_in_range() {
        for strategy in [ProbeStrategy::Linear, ProbeStrategy::Geometric] {
            for capacity in [4_usize, 8, 64, 1024] {
                for key in [0_u64, 1, 7, u64::MAX] {
                    for attempt in 0..capacity as u64 {
                        assert!(strategy.slot(capacity, key, attempt) < capacity);
                    }
                }
            }
        }
    }

    #[test]
    fn test_linear_sequence() {
        let probes: Vec<usize> =
            (0..4).map(|attempt| ProbeStrategy::Linear.slot(4, 6, attempt)).collect();
        assert_eq!(probes, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_geometric_sequence() {
        let probes: Vec<usize> =
            (0..4).map(|attempt| ProbeStrategy::Geometric.slot(4, 0, attempt)).collect();
        assert_eq!(probes, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_full_period_visits_every_slot() {
        for strategy in [ProbeStrategy::Linear, ProbeStrategy::Geometric] {
            for capacity in [4_usize, 16, 256] {
                for key in [0_u64, 3, 1_000_003, u64::MAX] {
                    let visited: BTreeSet<usize> = (0..capacity as u64)
                        .map(|attempt| strategy.slot(capacity, key, attempt))
                        .collect();
                    assert_eq!(visited.len(), capacity);
                }
            }
        }
    }

    #[test]
    fn test_keys_a_capacity_apart_probe_alike() {
        for attempt in 0..8 {
            assert_eq!(
                ProbeStrategy::Geometric.slot(8, 0, attempt),
                ProbeStrategy::Geometric.slot(8, 8, attempt)
            );
            assert_eq!(
                ProbeStrategy::Linear.slot(8, 0, attempt),
                ProbeStrategy::Linear.slot(8, 8, attempt)
            );
        }
    }

    #[test]
    fn test_default_is_geometric() {
        assert_eq!(ProbeStrategy::default(), ProbeStrategy::Geometric);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_rejects_non_power_of_two_capacity() {
        let _ = ProbeStrategy::Geometric.slot(6, 0, 0);
    }
}
