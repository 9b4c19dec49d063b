use crossterm::style::Color;

// --- Game Constants ---
pub const TITLE: &str = "Alien Invasion";
pub const TARGET_FPS: u32 = 60;
pub const HIGH_SCORE_FILE: &str = "high_score.txt";
pub const LOG_FILE: &str = "alien-invasion.log";

pub const DEBUG_SCREEN_WIDTH: u16 = 80;
pub const DEBUG_SCREEN_HEIGHT: u16 = 24;
// Smallest playfield whose fleet layout still holds one alien.
pub const MIN_SCREEN_WIDTH: u16 = 10;
pub const MIN_SCREEN_HEIGHT: u16 = 9;

pub const BG_COLOR: Color = Color::Rgb { r: 20, g: 20, b: 30 };
pub const TEXT_COLOR: Color = Color::Rgb { r: 200, g: 200, b: 200 };

pub const SHIP_SPEED: f64 = 0.5; // Cells per frame
pub const SHIP_LIMIT: u32 = 3;
pub const SHIP_SPRITE: [&str; 1] = ["/A\\"];
pub const SHIP_COLOR: Color = Color::Cyan;
pub const SHIP_ICON: char = 'A'; // Scoreboard lives display

pub const BULLET_SPEED: f64 = 0.6;
pub const BULLET_WIDTH: i32 = 1;
pub const BULLET_HEIGHT: i32 = 1;
pub const BULLET_CHAR: char = '|';
pub const BULLET_COLOR: Color = Color::Yellow;
pub const BULLETS_ALLOWED: usize = 3;

pub const ALIEN_SPEED: f64 = 0.1;
pub const ALIEN_SPRITE: [&str; 2] = ["<O>", "/-\\"];
pub const ALIEN_COLOR: Color = Color::Green;
pub const FLEET_DROP_SPEED: i32 = 1; // Rows per edge hit
pub const ALIEN_POINTS: u32 = 50;

pub const SPEEDUP_SCALE: f64 = 1.1;
pub const SCORE_SCALE: f64 = 1.5;

pub const HIT_PAUSE_MS: u64 = 500;

pub const BUTTON_WIDTH: i32 = 14;
pub const BUTTON_HEIGHT: i32 = 3;
pub const BUTTON_LABEL: &str = "Play";
pub const BUTTON_COLOR: Color = Color::Rgb { r: 0, g: 135, b: 0 };

// Without key-release reporting a held arrow only shows up as repeats.
pub const LEGACY_HOLD_FRAMES: u64 = 30;
