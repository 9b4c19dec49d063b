use crate::constants::*;
use crate::game_stats::GameStats;
use crate::rendering::GameGrid;
use crate::settings::Settings;

/// Pre-rendered HUD strings, refreshed only when the matching stat changes.
pub struct Scoreboard {
    pub score_str: String,
    pub high_score_str: String,
    pub level_str: String,
    pub ships: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut scoreboard = Scoreboard {
            score_str: String::new(),
            high_score_str: String::new(),
            level_str: String::new(),
            ships: 0,
        };
        scoreboard.prep_all(stats);
        scoreboard
    }

    pub fn prep_all(&mut self, stats: &GameStats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_str = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_str = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_str = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = stats.ships_left;
    }

    pub fn check_high_score(&mut self, stats: &mut GameStats) {
        if stats.update_high_score() {
            self.prep_high_score(stats);
        }
    }

    pub fn show_score(&self, game_grid: &mut GameGrid, settings: &Settings) {
        let right = settings.screen_width - 1;
        let score_x = right - self.score_str.chars().count() as i32;
        game_grid.draw_text(score_x, 0, &self.score_str, TEXT_COLOR);

        let level_x = right - self.level_str.chars().count() as i32;
        game_grid.draw_text(level_x, 1, &self.level_str, TEXT_COLOR);

        let high_x = (settings.screen_width - self.high_score_str.chars().count() as i32) / 2;
        game_grid.draw_text(high_x, 0, &self.high_score_str, TEXT_COLOR);

        for i in 0..self.ships as i32 {
            game_grid.set_char(1 + i * 2, 0, SHIP_ICON, SHIP_COLOR);
        }
    }
}

/// Rounds to the nearest ten and groups thousands with commas.
pub fn format_score(score: u32) -> String {
    let rounded = ((score as u64 + 5) / 10) * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
