use crate::config::TierAliases;
use crate::github::issues::Issue;
use std::fmt;

/// Difficulty tier, declared in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Beginner, Tier::Intermediate, Tier::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Beginner => "beginner",
            Tier::Intermediate => "intermediate",
            Tier::Advanced => "advanced",
        }
    }

    fn aliases<'a>(&self, aliases: &'a TierAliases) -> &'a [String] {
        match self {
            Tier::Beginner => &aliases.beginner,
            Tier::Intermediate => &aliases.intermediate,
            Tier::Advanced => &aliases.advanced,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Beginner => "Beginner",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

/// Picks the tier for a label set.
///
/// Tiers are checked in [`Tier::ALL`] order and the first one with a matching
/// alias wins, so an issue labelled both `easy` and `hard` is a beginner issue.
/// Labels with no known alias fall back to [`Tier::Intermediate`].
pub fn classify(labels: &[String], aliases: &TierAliases) -> Tier {
    Tier::ALL
        .into_iter()
        .find(|tier| {
            tier.aliases(aliases).iter().any(|alias| {
                labels
                    .iter()
                    .any(|label| label.to_lowercase() == alias.to_lowercase())
            })
        })
        .unwrap_or(Tier::Intermediate)
}

/// Issues grouped by tier, each list in fetch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierBuckets {
    pub beginner: Vec<Issue>,
    pub intermediate: Vec<Issue>,
    pub advanced: Vec<Issue>,
}

impl TierBuckets {
    pub fn get(&self, tier: Tier) -> &[Issue] {
        match tier {
            Tier::Beginner => &self.beginner,
            Tier::Intermediate => &self.intermediate,
            Tier::Advanced => &self.advanced,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut Vec<Issue> {
        match tier {
            Tier::Beginner => &mut self.beginner,
            Tier::Intermediate => &mut self.intermediate,
            Tier::Advanced => &mut self.advanced,
        }
    }

    /// All issues, beginner first, then intermediate, then advanced.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.get(tier).iter())
    }
}

pub fn categorize(issues: Vec<Issue>, aliases: &TierAliases) -> TierBuckets {
    issues
        .into_iter()
        .fold(TierBuckets::default(), |mut buckets, issue| {
            let tier = classify(&issue.labels, aliases);
            buckets.get_mut(tier).push(issue);
            buckets
        })
}
