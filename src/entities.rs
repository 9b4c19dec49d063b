use crate::constants::*;
use crate::rendering::GameGrid;
use crate::settings::{FleetDirection, Settings};
use crate::types::{Rect, to_cell};

fn sprite_rect(rows: &[&str]) -> Rect {
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    Rect::new(0, 0, width as i32, rows.len() as i32)
}

// --- Ship: horizontal movement only, clamped to the screen ---
pub struct Ship {
    pub rect: Rect,
    pub x: f64,
    pub moving_right: bool,
    pub moving_left: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            rect: sprite_rect(&SHIP_SPRITE),
            x: 0.0,
            moving_right: false,
            moving_left: false,
        };
        ship.center_ship(settings);
        ship
    }

    pub fn center_ship(&mut self, settings: &Settings) {
        self.rect.set_mid_bottom((settings.screen_width / 2, settings.screen_height));
        self.x = self.rect.x as f64;
    }

    pub fn update(&mut self, settings: &Settings) {
        if self.moving_right && self.rect.right() < settings.screen_width {
            self.x += settings.ship_speed;
        }
        if self.moving_left && self.rect.left() > 0 {
            self.x -= settings.ship_speed;
        }
        self.rect.x = to_cell(self.x);
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.draw_sprite(&self.rect, &SHIP_SPRITE, SHIP_COLOR);
    }
}

// --- Bullet: fired from the ship's nose, travels straight up ---
pub struct Bullet {
    pub rect: Rect,
    pub y: f64,
}

impl Bullet {
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let mut rect = Rect::new(0, 0, settings.bullet_width, settings.bullet_height);
        rect.set_mid_top(ship.rect.mid_top());
        Bullet { rect, y: rect.y as f64 }
    }

    pub fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed;
        self.rect.y = to_cell(self.y);
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }

    pub fn draw(&self, game_grid: &mut GameGrid, settings: &Settings) {
        game_grid.fill_rect(&self.rect, BULLET_CHAR, settings.bullet_color);
    }
}

// --- Alien: one member of the fleet ---
pub struct Alien {
    pub rect: Rect,
    pub x: f64,
}

impl Alien {
    pub fn new(x: i32, y: i32) -> Self {
        let mut rect = sprite_rect(&ALIEN_SPRITE);
        rect.x = x;
        rect.y = y;
        Alien { rect, x: x as f64 }
    }

    pub fn size() -> (i32, i32) {
        let rect = sprite_rect(&ALIEN_SPRITE);
        (rect.width, rect.height)
    }

    /// True when the edge facing `direction` has reached the screen boundary.
    pub fn check_edges(&self, settings: &Settings, direction: FleetDirection) -> bool {
        match direction {
            FleetDirection::Right => self.rect.right() >= settings.screen_width,
            FleetDirection::Left => self.rect.left() <= 0,
        }
    }

    pub fn update(&mut self, settings: &Settings, direction: FleetDirection) {
        self.x += settings.alien_speed * direction.sign();
        self.rect.x = to_cell(self.x);
    }

    pub fn drop_by(&mut self, rows: i32) {
        self.rect.y += rows;
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.draw_sprite(&self.rect, &ALIEN_SPRITE, ALIEN_COLOR);
    }
}
