//! Score and chain-length milestones.

use std::collections::BTreeSet;

use crate::types::Achievement;

const SCORE_MILESTONES: &[(u32, Achievement)] = &[
    (25, Achievement::RisingStar),
    (50, Achievement::WordSmith),
    (100, Achievement::LexiconMaster),
];

const CHAIN_MILESTONES: &[(usize, Achievement)] = &[
    (5, Achievement::ChainStarter),
    (10, Achievement::ChainBuilder),
    (20, Achievement::ChainLegend),
];

/// Achievements earned by a session with this score and chain length.
pub fn earned(score: u32, chain_len: usize) -> BTreeSet<Achievement> {
    let by_score = SCORE_MILESTONES
        .iter()
        .filter(|(min, _)| score >= *min)
        .map(|(_, a)| *a);
    let by_chain = CHAIN_MILESTONES
        .iter()
        .filter(|(min, _)| chain_len >= *min)
        .map(|(_, a)| *a);
    by_score.chain(by_chain).collect()
}

/// Merge newly earned achievements into `held`, returning the ones that are new.
///
/// Achievements are never taken away, even if a hint penalty drops the score
/// back under a threshold.
pub fn unlock(held: &mut BTreeSet<Achievement>, score: u32, chain_len: usize) -> Vec<Achievement> {
    earned(score, chain_len)
        .into_iter()
        .filter(|a| held.insert(*a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert!(earned(24, 4).is_empty());
        assert_eq!(
            earned(25, 5).into_iter().collect::<Vec<_>>(),
            vec![Achievement::RisingStar, Achievement::ChainStarter]
        );
        assert_eq!(earned(100, 20).len(), 6);
    }

    #[test]
    fn unlock_reports_only_new_entries() {
        let mut held = BTreeSet::new();
        assert_eq!(unlock(&mut held, 30, 1), vec![Achievement::RisingStar]);
        assert!(unlock(&mut held, 30, 2).is_empty());
        assert!(unlock(&mut held, 10, 2).is_empty());
        assert!(held.contains(&Achievement::RisingStar));
    }
}
