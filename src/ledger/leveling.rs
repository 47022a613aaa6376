//! Experience and levels. Each threshold is 1.5x the previous one, rounded,
//! and leftover experience carries into the next level.

use crate::shared::*;

pub const THRESHOLD_GROWTH: f64 = 1.5;

impl PlayerProgression {
    /// Add experience and apply every level-up it pays for. Returns the number
    /// of levels gained.
    pub fn grant(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.next_level_threshold > 0 && self.experience >= self.next_level_threshold {
            self.level += 1;
            self.experience -= self.next_level_threshold;
            self.next_level_threshold =
                (self.next_level_threshold as f64 * THRESHOLD_GROWTH).round() as u32;
            gained += 1;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_grant_below_threshold() {
        let mut p = PlayerProgression::default();
        assert_eq!(p.grant(10), 0);
        assert_eq!(p, PlayerProgression { experience: 10, level: 1, next_level_threshold: 100 });
    }

    #[test]
    fn crossing_the_threshold_carries_the_remainder() {
        let mut p = PlayerProgression {
            experience: 95,
            level: 1,
            next_level_threshold: 100,
        };
        assert_eq!(p.grant(10), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 5);
        assert_eq!(p.next_level_threshold, 150);
    }

    #[test]
    fn large_grant_jumps_several_levels() {
        let mut p = PlayerProgression::default();
        // 100 + 150 + 225 = 475
        assert_eq!(p.grant(480), 3);
        assert_eq!(p.level, 4);
        assert_eq!(p.experience, 5);
        assert_eq!(p.next_level_threshold, 338);
    }

    #[test]
    fn thresholds_compound_with_rounding() {
        let mut p = PlayerProgression::default();
        let mut thresholds = Vec::new();
        for _ in 0..4 {
            p.grant(p.next_level_threshold);
            thresholds.push(p.next_level_threshold);
        }
        assert_eq!(thresholds, vec![150, 225, 338, 507]);
        assert_eq!(p.experience, 0);
    }
}
