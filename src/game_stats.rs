use crate::settings::Settings;

/// Session counters. `high_score` survives `reset_stats`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
}

impl GameStats {
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let mut stats = GameStats {
            ships_left: 0,
            score: 0,
            level: 1,
            high_score,
        };
        stats.reset_stats(settings);
        stats
    }

    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Returns true if the high score moved.
    pub fn update_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_high_score() {
        let settings = Settings::new(80, 24);
        let mut stats = GameStats::new(&settings, 900);
        stats.score = 1200;
        stats.level = 4;
        stats.ships_left = 0;
        stats.reset_stats(&settings);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.ships_left, settings.ship_limit);
        assert_eq!(stats.high_score, 900);
    }

    #[test]
    fn high_score_is_max_of_score_and_previous() {
        let settings = Settings::new(80, 24);
        let mut stats = GameStats::new(&settings, 500);
        stats.add_points(300);
        assert!(!stats.update_high_score());
        assert_eq!(stats.high_score, 500);
        stats.add_points(400);
        assert!(stats.update_high_score());
        assert_eq!(stats.high_score, 700);
    }
}
