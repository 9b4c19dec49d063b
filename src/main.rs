mod app;
mod button;
mod clock;
mod constants;
mod entities;
mod fleet;
mod game;
mod game_stats;
mod high_score;
mod rendering;
mod scoreboard;
mod settings;
mod terminal_io;
mod types;

use std::env;
use std::io::{self, Write};

use anyhow::Context;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, size, SetTitle},
};
use log::{error, info, warn};

use crate::app::App;
use crate::clock::FrameClock;
use crate::constants::*;
use crate::game::Game;
use crate::high_score::HighScoreStore;
use crate::rendering::{FrameCapture, GameGrid, Screen};
use crate::settings::Settings;
use crate::terminal_io::{debug_script, EventSource, KeyHold, SimulatedInput};

/// `alien-invasion [--debug [WIDTH HEIGHT [MAX_FRAMES]]]` or `alien-invasion [MAX_FRAMES]`.
struct LaunchOptions {
    debug_mode_active: bool,
    width: u16,
    height: u16,
    max_frames: Option<u64>,
}

fn parse_args(args: &[String]) -> LaunchOptions {
    let debug_mode_active = args.len() > 1 && args[1] == "--debug";
    if debug_mode_active {
        let mut width = DEBUG_SCREEN_WIDTH;
        let mut height = DEBUG_SCREEN_HEIGHT;
        if args.len() >= 4 {
            width = args[2].parse::<u16>().unwrap_or(DEBUG_SCREEN_WIDTH);
            height = args[3].parse::<u16>().unwrap_or(DEBUG_SCREEN_HEIGHT);
        }
        let max_frames = args.get(4).and_then(|arg| arg.parse::<u64>().ok());
        LaunchOptions { debug_mode_active, width, height, max_frames }
    } else {
        let max_frames = args.get(1).and_then(|arg| arg.parse::<u64>().ok());
        LaunchOptions { debug_mode_active, width: 0, height: 0, max_frames }
    }
}

/// Raw mode, mouse capture and key-release reporting for the lifetime of the game.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture, SetTitle(TITLE))?;

        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            info!("Keyboard enhancement enabled, key releases will be reported.");
        } else {
            warn!("Terminal does not report key releases, using a {}-frame hold window.", LEGACY_HOLD_FRAMES);
        }
        Ok(TerminalGuard { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        if let Err(e) = execute!(stdout, DisableMouseCapture, Show) {
            error!("Failed to restore cursor and mouse: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode on exit: {}", e);
        }
        let _ = stdout.flush();
    }
}

fn main() -> anyhow::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)
        .with_context(|| format!("failed to open log file {}", LOG_FILE))?;
    info!("Starting {}.", TITLE);

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let store = HighScoreStore::new(HIGH_SCORE_FILE);
    let high_score = store
        .load()
        .with_context(|| format!("could not load high score from {}", store.path().display()))?;

    let _guard;
    let (screen, input, key_hold, width, height) = if options.debug_mode_active {
        info!("Debug mode enabled at {}x{}.", options.width, options.height);
        (
            Screen::Headless(FrameCapture::new(options.width, options.height)),
            EventSource::Simulated(SimulatedInput::new(debug_script())),
            KeyHold::new(true, LEGACY_HOLD_FRAMES),
            options.width,
            options.height,
        )
    } else {
        let guard = TerminalGuard::enter().context("failed to prepare terminal")?;
        let key_hold = KeyHold::new(guard.keyboard_enhanced, LEGACY_HOLD_FRAMES);
        _guard = guard;
        let (width, height) = size().context("failed to read terminal size")?;
        info!("Terminal size: {}x{}", width, height);
        let mut screen = Screen::Terminal(io::stdout());
        GameGrid::new(width, height).clear_screen_manual(&mut screen)?;
        (screen, EventSource::Terminal, key_hold, width, height)
    };

    anyhow::ensure!(
        settings::playfield_fits(width, height),
        "playfield {}x{} is too small, need at least {}x{}",
        width, height, MIN_SCREEN_WIDTH, MIN_SCREEN_HEIGHT
    );
    let settings = Settings::new(width, height);
    let clock = FrameClock::new(settings.frame_duration(), !options.debug_mode_active);
    let game = Game::new(settings, high_score);
    let mut app = App::new(game, screen, input, key_hold, store, clock, options.max_frames);

    let frames = app.run().context("game loop failed")?;
    info!("Game loop ended after {} frames. Exiting application.", frames);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn debug_args_with_size_and_frames() {
        let options = parse_args(&args(&["alien-invasion", "--debug", "60", "20", "90"]));
        assert!(options.debug_mode_active);
        assert_eq!((options.width, options.height), (60, 20));
        assert_eq!(options.max_frames, Some(90));
    }

    #[test]
    fn debug_args_fall_back_to_defaults() {
        let options = parse_args(&args(&["alien-invasion", "--debug", "wide", "tall"]));
        assert_eq!((options.width, options.height), (DEBUG_SCREEN_WIDTH, DEBUG_SCREEN_HEIGHT));
        assert_eq!(options.max_frames, None);
    }

    #[test]
    fn plain_frame_limit() {
        let options = parse_args(&args(&["alien-invasion", "120"]));
        assert!(!options.debug_mode_active);
        assert_eq!(options.max_frames, Some(120));
    }
}
