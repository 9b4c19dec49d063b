use std::io::{self, Write};
use crossterm::cursor::{Hide, Show};
use crossterm::event::Event;
use log::{debug, error, info};

use crate::clock::FrameClock;
use crate::game::{Control, Game, ShipHit};
use crate::high_score::{HighScoreError, HighScoreStore};
use crate::rendering::{GameGrid, Screen};
use crate::terminal_io::{translate, EventSource, KeyHold};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
    #[error(transparent)]
    HighScore(#[from] HighScoreError),
}

/// The frame loop: input, simulation, drawing and pacing around a `Game`.
pub struct App {
    game: Game,
    screen: Screen,
    input: EventSource,
    key_hold: KeyHold,
    store: HighScoreStore,
    clock: FrameClock,
    game_grid: GameGrid,
    max_frames: Option<u64>,
    cursor_visible: bool,
}

impl App {
    pub fn new(
        game: Game,
        screen: Screen,
        input: EventSource,
        key_hold: KeyHold,
        store: HighScoreStore,
        clock: FrameClock,
        max_frames: Option<u64>,
    ) -> Self {
        let game_grid = GameGrid::new(
            game.settings.screen_width as u16,
            game.settings.screen_height as u16,
        );
        App {
            game,
            screen,
            input,
            key_hold,
            store,
            clock,
            game_grid,
            max_frames,
            cursor_visible: true,
        }
    }

    /// Runs until a quit request, the frame limit or an I/O failure, then saves
    /// the high score. A loop failure still gets the save attempt.
    pub fn run(&mut self) -> Result<u64, AppError> {
        let outcome = self.run_frames();
        self.finish(outcome)
    }

    fn run_frames(&mut self) -> Result<u64, AppError> {
        let mut frame_count = 0;
        while self.max_frames.is_none_or(|max| frame_count < max) {
            if self.check_events(frame_count)? == Control::Quit {
                info!("Quit requested on frame {}", frame_count);
                break;
            }

            let report = self.game.update();
            if report.aliens_destroyed > 0 {
                debug!("Frame {}: {} aliens destroyed", frame_count, report.aliens_destroyed);
            }
            if report.fleet_turned {
                debug!("Frame {}: fleet turned {:?}", frame_count, self.game.fleet.direction);
            }
            if report.wave_cleared {
                info!("Level {} reached with score {}", self.game.stats.level, self.game.stats.score);
            }
            if report.ship_hit == Some(ShipHit::LifeLost) {
                self.clock.pause(self.game.settings.hit_pause);
            }

            self.update_screen()?;
            self.clock.tick();
            frame_count += 1;
        }
        Ok(frame_count)
    }

    fn finish(&mut self, outcome: Result<u64, AppError>) -> Result<u64, AppError> {
        let saved = self.store.save(self.game.stats.high_score);
        match (outcome, saved) {
            (Ok(frames), Ok(())) => Ok(frames),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(save_error)) => {
                error!("High score not saved after loop failure: {}", save_error);
                Err(e)
            }
        }
    }

    fn check_events(&mut self, frame_count: u64) -> io::Result<Control> {
        let mut actions = Vec::new();
        for event in self.input.drain(frame_count)? {
            if let Event::Resize(width, height) = event {
                info!("Terminal resized to {}x{}, keeping playfield size", width, height);
            }
            if let Some(action) = translate(&event) {
                actions.extend(self.key_hold.filter(action, frame_count));
            }
        }
        actions.extend(self.key_hold.expire(frame_count));

        for action in actions {
            if self.game.handle_action(action) == Control::Quit {
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    fn update_screen(&mut self) -> io::Result<()> {
        if self.game.pointer_visible != self.cursor_visible {
            if self.game.pointer_visible {
                self.screen.queue(Show)?;
            } else {
                self.screen.queue(Hide)?;
            }
            self.cursor_visible = self.game.pointer_visible;
        }

        self.game.draw(&mut self.game_grid);
        self.game_grid
            .render(&mut self.screen, self.game.settings.bg_color)
            .map_err(|e| { error!("Failed to render frame: {}", e); e })?;
        self.screen.flush().map_err(|e| { error!("Failed to flush frame: {}", e); e })?;
        self.screen.log_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::time::Duration;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::rendering::FrameCapture;
    use crate::settings::Settings;
    use crate::terminal_io::{debug_script, SimulatedInput};

    fn headless_app(
        script: HashMap<u64, Vec<Event>>,
        store: HighScoreStore,
        max_frames: Option<u64>,
    ) -> App {
        let high_score = store.load().unwrap();
        let game = Game::new(Settings::new(80, 24), high_score);
        App::new(
            game,
            Screen::Headless(FrameCapture::new(80, 24)),
            EventSource::Simulated(SimulatedInput::new(script)),
            KeyHold::new(true, 30),
            store,
            FrameClock::new(Duration::from_millis(16), false),
            max_frames,
        )
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quit_key_stops_loop_and_saves_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.txt");
        fs::write(&path, "320").unwrap();

        let mut script = HashMap::new();
        script.insert(3, vec![press(KeyCode::Char('q'))]);
        let mut app = headless_app(script, HighScoreStore::new(&path), None);

        assert_eq!(app.run().unwrap(), 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "320");
    }

    #[test]
    fn saved_value_is_max_of_session_and_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.txt");
        fs::write(&path, "100").unwrap();

        let mut script = HashMap::new();
        script.insert(0, vec![press(KeyCode::Char('p'))]);
        script.insert(2, vec![press(KeyCode::Char('q'))]);
        let mut app = headless_app(script, HighScoreStore::new(&path), None);
        app.run().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "100");

        let mut script = HashMap::new();
        script.insert(5, vec![press(KeyCode::Char('q'))]);
        let mut app = headless_app(script, HighScoreStore::new(&path), None);
        app.game.start_game();
        app.game.stats.score = 950;
        app.game.scoreboard.check_high_score(&mut app.game.stats);
        app.run().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "950");
    }

    #[test]
    fn high_score_is_saved_when_the_loop_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.txt");
        let mut app = headless_app(HashMap::new(), HighScoreStore::new(&path), None);
        app.game.start_game();
        app.game.stats.score = 1200;
        app.game.scoreboard.check_high_score(&mut app.game.stats);

        let failure = AppError::Io(io::Error::other("terminal went away"));
        let result = app.finish(Err(failure));

        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1200");
    }

    #[test]
    fn debug_script_plays_a_round() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("high_score.txt"));
        let mut app = headless_app(debug_script(), store, Some(300));

        assert_eq!(app.run().unwrap(), 300);
        assert!(app.game.game_active);
        assert!(!app.cursor_visible);
        match &app.screen {
            Screen::Headless(capture) => {
                assert!(capture.row_text(23).contains("/A\\"));
                assert!(!capture.row_text(12).contains("Play"));
            }
            Screen::Terminal(_) => unreachable!(),
        }
        assert!(dir.path().join("high_score.txt").exists());
    }
}
