use crate::classify::TierBuckets;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub open: usize,
    /// Distinct assignee logins across all tiers.
    pub contributors: usize,
}

impl Statistics {
    pub fn from_buckets(buckets: &TierBuckets) -> Self {
        let total = buckets.iter().count();
        let completed = buckets.iter().filter(|issue| issue.is_closed()).count();
        let contributors = buckets
            .iter()
            .filter_map(|issue| issue.assignee.as_deref())
            .collect::<HashSet<_>>()
            .len();

        Statistics {
            total,
            completed,
            open: total - completed,
            contributors,
        }
    }
}
