use crate::types::Fact;

/// Add `increment` to the score of the first fact whose identity is `unique`.
/// Returns whether a fact was found.
pub fn reward_first_match(facts: &mut [Fact], unique: &str, increment: i64) -> bool {
    match facts.iter_mut().find(|f| f.unique() == unique) {
        Some(found) => {
            found.score += increment;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewards_only_first_match() {
        let used = Fact::new("host.user", "root", 1);
        let mut facts = vec![
            Fact::new("host.user", "root", 5).with_collector("A1"),
            Fact::new("host.user", "root", 5).with_collector("A2"),
            Fact::new("software.name", "bash", 2),
        ];

        assert!(reward_first_match(&mut facts, &used.unique(), 3));
        assert_eq!(facts[0].score, 8);
        assert_eq!(facts[1].score, 5);
        assert_eq!(facts[2].score, 2);
    }

    #[test]
    fn test_missing_fact_is_untouched() {
        let used = Fact::new("host.ip", "10.0.0.1", 1);
        let mut facts = vec![Fact::new("software.name", "bash", 2)];

        assert!(!reward_first_match(&mut facts, &used.unique(), 3));
        assert_eq!(facts[0].score, 2);
    }
}
