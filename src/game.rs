use log::info;

use crate::button::Button;
use crate::constants::BUTTON_LABEL;
use crate::entities::{Bullet, Ship};
use crate::fleet::Fleet;
use crate::game_stats::GameStats;
use crate::rendering::GameGrid;
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::terminal_io::InputAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipHit {
    /// A ship was used up; the caller should pause before the next frame.
    LifeLost,
    GameOver,
}

/// What happened during one call to `Game::update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub aliens_destroyed: usize,
    pub wave_cleared: bool,
    pub fleet_turned: bool,
    pub ship_hit: Option<ShipHit>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// All game state and the rules that advance it one frame at a time.
/// Terminal I/O and timing live in `App`.
pub struct Game {
    pub settings: Settings,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub play_button: Button,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub fleet: Fleet,
    pub game_active: bool,
    pub pointer_visible: bool,
}

impl Game {
    pub fn new(settings: Settings, high_score: u32) -> Self {
        let stats = GameStats::new(&settings, high_score);
        let scoreboard = Scoreboard::new(&stats);
        let play_button = Button::new(&settings, BUTTON_LABEL);
        let ship = Ship::new(&settings);
        let fleet = Fleet::new(&settings);
        Game {
            settings,
            stats,
            scoreboard,
            play_button,
            ship,
            bullets: Vec::new(),
            fleet,
            game_active: false,
            pointer_visible: true,
        }
    }

    pub fn handle_action(&mut self, action: InputAction) -> Control {
        match action {
            InputAction::MoveLeft(held) => self.ship.moving_left = held,
            InputAction::MoveRight(held) => self.ship.moving_right = held,
            InputAction::Fire => self.fire_bullet(),
            InputAction::Start => self.start_game(),
            InputAction::Click { column, row } => self.check_play_button(column, row),
            InputAction::Quit => return Control::Quit,
        }
        Control::Continue
    }

    fn check_play_button(&mut self, column: u16, row: u16) {
        if !self.game_active && self.play_button.contains(column, row) {
            self.start_game();
        }
    }

    pub fn start_game(&mut self) {
        self.settings.initialize_dynamic_settings();
        self.stats.reset_stats(&self.settings);
        self.scoreboard.prep_score(&self.stats);
        self.scoreboard.prep_level(&self.stats);
        self.scoreboard.prep_ships(&self.stats);
        self.game_active = true;

        self.bullets.clear();
        self.fleet.rebuild(&self.settings);
        self.fleet.reset_direction(&self.settings);
        self.ship.center_ship(&self.settings);
        self.pointer_visible = false;
        info!("New game started with {} aliens", self.fleet.len());
    }

    pub fn fire_bullet(&mut self) {
        if self.game_active && self.bullets.len() < self.settings.bullets_allowed {
            self.bullets.push(Bullet::new(&self.settings, &self.ship));
        }
    }

    /// One simulation step. Does nothing while the start screen is showing.
    pub fn update(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.game_active {
            return report;
        }
        self.ship.update(&self.settings);
        self.update_bullets(&mut report);
        self.update_aliens(&mut report);
        report
    }

    fn update_bullets(&mut self, report: &mut FrameReport) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
        self.bullets.retain(|bullet| !bullet.is_off_screen());
        self.check_bullet_alien_collisions(report);
    }

    fn check_bullet_alien_collisions(&mut self, report: &mut FrameReport) {
        let fleet = &mut self.fleet;
        let mut destroyed = 0;
        self.bullets.retain(|bullet| {
            let hits = fleet.destroy_overlapping(&bullet.rect);
            destroyed += hits;
            hits == 0
        });

        if destroyed > 0 {
            self.stats.add_points(self.settings.alien_points * destroyed as u32);
            self.scoreboard.prep_score(&self.stats);
            self.scoreboard.check_high_score(&mut self.stats);
            report.aliens_destroyed = destroyed;
        }

        // A layout with no room for aliens starts empty and must not level up every frame.
        if destroyed > 0 && self.fleet.is_empty() {
            self.bullets.clear();
            self.fleet.rebuild(&self.settings);
            self.settings.increase_speed();
            self.stats.level += 1;
            self.scoreboard.prep_level(&self.stats);
            report.wave_cleared = true;
            info!("Wave cleared, now on level {}", self.stats.level);
        }
    }

    fn update_aliens(&mut self, report: &mut FrameReport) {
        report.fleet_turned = self.fleet.update(&self.settings);

        if self.fleet.collides_with(&self.ship.rect) || self.fleet.reached_bottom(&self.settings) {
            report.ship_hit = Some(self.ship_hit());
        }
    }

    pub fn ship_hit(&mut self) -> ShipHit {
        if self.stats.ships_left > 0 {
            self.stats.ships_left -= 1;
            self.scoreboard.prep_ships(&self.stats);

            self.bullets.clear();
            self.fleet.rebuild(&self.settings);
            self.ship.center_ship(&self.settings);
            info!("Ship hit, {} ships left", self.stats.ships_left);
            ShipHit::LifeLost
        } else {
            self.game_active = false;
            self.pointer_visible = true;
            info!("Game over with score {}", self.stats.score);
            ShipHit::GameOver
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.clear();
        for bullet in &self.bullets {
            bullet.draw(game_grid, &self.settings);
        }
        self.ship.draw(game_grid);
        self.fleet.draw(game_grid);
        self.scoreboard.show_score(game_grid, &self.settings);
        if !self.game_active {
            self.play_button.draw_button(game_grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Alien;
    use crate::fleet::expected_fleet_size;
    use crate::settings::FleetDirection;
    use crate::types::Rect;

    fn active_game() -> Game {
        let mut game = Game::new(Settings::new(80, 24), 0);
        game.handle_action(InputAction::Start);
        game
    }

    fn bullet_at(x: i32, y: i32) -> Bullet {
        Bullet { rect: Rect::new(x, y, 1, 1), y: y as f64 }
    }

    #[test]
    fn starts_inactive_with_pointer_visible() {
        let mut game = Game::new(Settings::new(80, 24), 0);
        assert!(!game.game_active);
        assert!(game.pointer_visible);
        assert_eq!(game.update(), FrameReport::default());
        game.handle_action(InputAction::Fire);
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn start_game_resets_everything() {
        let mut game = active_game();
        game.stats.score = 4000;
        game.stats.level = 3;
        game.stats.ships_left = 1;
        game.settings.increase_speed();
        game.fleet.aliens.truncate(2);
        game.bullets.push(bullet_at(5, 5));

        game.start_game();
        assert_eq!(game.stats.score, 0);
        assert_eq!(game.stats.level, 1);
        assert_eq!(game.stats.ships_left, game.settings.ship_limit);
        assert!(game.bullets.is_empty());
        assert_eq!(game.fleet.len(), expected_fleet_size(80, 24));
        assert_eq!(game.settings.alien_points, crate::constants::ALIEN_POINTS);
        assert!(game.game_active);
        assert!(!game.pointer_visible);
        assert_eq!(game.scoreboard.score_str, "0");
    }

    #[test]
    fn play_button_only_starts_when_inactive() {
        let mut game = Game::new(Settings::new(80, 24), 0);
        game.handle_action(InputAction::Click { column: 0, row: 0 });
        assert!(!game.game_active);
        game.handle_action(InputAction::Click { column: 40, row: 12 });
        assert!(game.game_active);

        game.stats.score = 300;
        game.handle_action(InputAction::Click { column: 40, row: 12 });
        assert_eq!(game.stats.score, 300);
    }

    #[test]
    fn bullet_limit_is_enforced() {
        let mut game = active_game();
        for _ in 0..10 {
            game.handle_action(InputAction::Fire);
        }
        assert_eq!(game.bullets.len(), game.settings.bullets_allowed);
    }

    #[test]
    fn off_screen_bullets_are_purged() {
        let mut game = active_game();
        game.bullets.push(bullet_at(0, 0));
        game.update();
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn one_bullet_can_take_out_overlapping_aliens() {
        let mut game = active_game();
        let first = game.fleet.aliens[0].rect;
        game.fleet.aliens.push(Alien::new(first.x, first.y));
        let before = game.fleet.len();

        let mut report = FrameReport::default();
        game.bullets.push(bullet_at(first.x + 1, first.y + 1));
        game.check_bullet_alien_collisions(&mut report);

        assert_eq!(report.aliens_destroyed, 2);
        assert_eq!(game.fleet.len(), before - 2);
        assert!(game.bullets.is_empty());
        assert_eq!(game.stats.score, game.settings.alien_points * 2);
        assert_eq!(game.stats.high_score, game.stats.score);
    }

    #[test]
    fn second_bullet_on_same_alien_survives() {
        let mut game = active_game();
        let first = game.fleet.aliens[0].rect;
        game.bullets.push(bullet_at(first.x, first.y));
        game.bullets.push(bullet_at(first.x + 1, first.y));

        let mut report = FrameReport::default();
        game.check_bullet_alien_collisions(&mut report);
        assert_eq!(report.aliens_destroyed, 1);
        assert_eq!(game.bullets.len(), 1);
    }

    #[test]
    fn clearing_the_fleet_levels_up() {
        let mut game = active_game();
        game.fleet.aliens.truncate(1);
        let last = game.fleet.aliens[0].rect;
        game.bullets.push(bullet_at(last.x, last.y));
        game.bullets.push(bullet_at(0, 20));
        let speed = game.settings.alien_speed;

        let mut report = FrameReport::default();
        game.check_bullet_alien_collisions(&mut report);

        assert!(report.wave_cleared);
        assert_eq!(game.stats.level, 2);
        assert_eq!(game.scoreboard.level_str, "2");
        assert!(game.bullets.is_empty());
        assert_eq!(game.fleet.len(), expected_fleet_size(80, 24));
        assert!(game.settings.alien_speed > speed);
    }

    #[test]
    fn new_waves_keep_heading_but_new_games_do_not() {
        let mut game = active_game();
        game.fleet.direction = FleetDirection::Left;

        game.fleet.aliens.truncate(1);
        let last = game.fleet.aliens[0].rect;
        game.bullets.push(bullet_at(last.x, last.y));
        let mut report = FrameReport::default();
        game.check_bullet_alien_collisions(&mut report);
        assert!(report.wave_cleared);
        assert_eq!(game.fleet.direction, FleetDirection::Left);

        game.ship_hit();
        assert_eq!(game.fleet.direction, FleetDirection::Left);

        game.start_game();
        assert_eq!(game.fleet.direction, FleetDirection::Right);
    }

    #[test]
    fn playfield_without_aliens_never_levels_up() {
        let mut game = Game::new(Settings::new(40, 8), 0);
        game.handle_action(InputAction::Start);
        assert!(game.fleet.is_empty());

        for _ in 0..10 {
            let report = game.update();
            assert!(!report.wave_cleared);
        }
        assert_eq!(game.stats.level, 1);
        assert_eq!(game.settings.alien_points, crate::constants::ALIEN_POINTS);
        assert_eq!(game.scoreboard.level_str, "1");
    }

    #[test]
    fn score_uses_points_at_time_of_hit() {
        let mut game = active_game();
        game.settings.increase_speed();
        let points = game.settings.alien_points;
        let first = game.fleet.aliens[0].rect;
        game.bullets.push(bullet_at(first.x, first.y));
        game.stats.score = 1000;

        let mut report = FrameReport::default();
        game.check_bullet_alien_collisions(&mut report);
        assert_eq!(game.stats.score, 1000 + points);
    }

    #[test]
    fn ship_hit_costs_exactly_one_life() {
        let mut game = active_game();
        game.bullets.push(bullet_at(10, 10));
        game.fleet.aliens.truncate(3);
        let lives = game.stats.ships_left;

        assert_eq!(game.ship_hit(), ShipHit::LifeLost);
        assert_eq!(game.stats.ships_left, lives - 1);
        assert_eq!(game.scoreboard.ships, lives - 1);
        assert!(game.bullets.is_empty());
        assert_eq!(game.fleet.len(), expected_fleet_size(80, 24));
        assert!(game.game_active);
    }

    #[test]
    fn last_hit_ends_the_game() {
        let mut game = active_game();
        game.stats.ships_left = 0;
        assert_eq!(game.ship_hit(), ShipHit::GameOver);
        assert!(!game.game_active);
        assert!(game.pointer_visible);
        assert_eq!(game.stats.ships_left, 0);
    }

    #[test]
    fn alien_touching_ship_triggers_hit() {
        let mut game = active_game();
        let ship = game.ship.rect;
        game.fleet.aliens.truncate(1);
        game.fleet.aliens[0] = Alien::new(ship.x, ship.y - 1);
        let report = game.update();
        assert_eq!(report.ship_hit, Some(ShipHit::LifeLost));
        assert_eq!(game.stats.ships_left, game.settings.ship_limit - 1);
    }

    #[test]
    fn alien_reaching_bottom_triggers_hit() {
        let mut game = active_game();
        game.fleet.aliens.truncate(1);
        game.fleet.aliens[0] = Alien::new(0, 22);
        game.fleet.aliens[0].x = 0.0;
        game.fleet.direction = FleetDirection::Right;
        let report = game.update();
        assert_eq!(report.ship_hit, Some(ShipHit::LifeLost));
    }

    #[test]
    fn quit_is_reported() {
        let mut game = active_game();
        assert_eq!(game.handle_action(InputAction::Quit), Control::Quit);
        assert_eq!(game.handle_action(InputAction::MoveLeft(true)), Control::Continue);
        assert!(game.ship.moving_left);
    }

    #[test]
    fn draw_shows_button_only_when_inactive() {
        let mut game = Game::new(Settings::new(80, 24), 0);
        let mut grid = GameGrid::new(80, 24);
        game.draw(&mut grid);
        assert!(grid.row_text(12).contains("Play"));

        game.start_game();
        game.draw(&mut grid);
        assert!(!grid.row_text(12).contains("Play"));
        assert!(grid.row_text(23).contains("/A\\"));
    }
}
