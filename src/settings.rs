use std::time::Duration;

use crossterm::style::Color;

use crate::constants::*;

/// Horizontal travel of the whole fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetDirection {
    Right,
    Left,
}

impl FleetDirection {
    pub fn sign(self) -> f64 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

pub fn playfield_fits(width: u16, height: u16) -> bool {
    width >= MIN_SCREEN_WIDTH && height >= MIN_SCREEN_HEIGHT
}

/// Static and per-session tunables. Only `increase_speed` and
/// `initialize_dynamic_settings` mutate it after construction.
#[derive(Clone, Debug)]
pub struct Settings {
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Color,
    pub target_fps: u32,

    pub ship_limit: u32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Color,
    pub bullets_allowed: usize,
    pub fleet_drop_speed: i32,
    pub initial_fleet_direction: FleetDirection,
    pub speedup_scale: f64,
    pub score_scale: f64,
    pub hit_pause: Duration,

    // Dynamic
    pub ship_speed: f64,
    pub bullet_speed: f64,
    pub alien_speed: f64,
    pub alien_points: u32,
}

impl Settings {
    pub fn new(screen_width: u16, screen_height: u16) -> Self {
        let mut settings = Settings {
            screen_width: screen_width as i32,
            screen_height: screen_height as i32,
            bg_color: BG_COLOR,
            target_fps: TARGET_FPS,
            ship_limit: SHIP_LIMIT,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_color: BULLET_COLOR,
            bullets_allowed: BULLETS_ALLOWED,
            fleet_drop_speed: FLEET_DROP_SPEED,
            initial_fleet_direction: FleetDirection::Right,
            speedup_scale: SPEEDUP_SCALE,
            score_scale: SCORE_SCALE,
            hit_pause: Duration::from_millis(HIT_PAUSE_MS),
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
        };
        settings.initialize_dynamic_settings();
        settings
    }

    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = SHIP_SPEED;
        self.bullet_speed = BULLET_SPEED;
        self.alien_speed = ALIEN_SPEED;
        self.alien_points = ALIEN_POINTS;
    }

    /// Level-up: everything moves faster and each alien is worth more.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points = (self.alien_points as f64 * self.score_scale) as u32;
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }
}
