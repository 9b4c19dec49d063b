use std::collections::HashMap;
use std::io;
use std::time::Duration;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use log::error;

/// What a terminal event means to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft(bool),
    MoveRight(bool),
    Fire,
    Start,
    Quit,
    Click { column: u16, row: u16 },
}

pub fn translate(event: &Event) -> Option<InputAction> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputAction::Click {
                column: mouse_event.column,
                row: mouse_event.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key_event: &KeyEvent) -> Option<InputAction> {
    let held = match key_event.kind {
        KeyEventKind::Release => false,
        KeyEventKind::Press | KeyEventKind::Repeat => true,
    };
    match key_event.code {
        KeyCode::Left | KeyCode::Char('a') => Some(InputAction::MoveLeft(held)),
        KeyCode::Right | KeyCode::Char('d') => Some(InputAction::MoveRight(held)),
        _ if key_event.kind != KeyEventKind::Press => None,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Char(' ') => Some(InputAction::Fire),
        KeyCode::Char('p') => Some(InputAction::Start),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

// --- KeyHold: synthesizes releases on terminals that never report them ---
pub struct KeyHold {
    release_events: bool,
    hold_frames: u64,
    left_seen_at: Option<u64>,
    right_seen_at: Option<u64>,
}

impl KeyHold {
    pub fn new(release_events: bool, hold_frames: u64) -> Self {
        KeyHold {
            release_events,
            hold_frames,
            left_seen_at: None,
            right_seen_at: None,
        }
    }

    pub fn filter(&mut self, action: InputAction, frame: u64) -> Vec<InputAction> {
        if self.release_events {
            return vec![action];
        }
        match action {
            InputAction::MoveLeft(true) => {
                self.left_seen_at = Some(frame);
                let mut out = vec![action];
                if self.right_seen_at.take().is_some() {
                    out.push(InputAction::MoveRight(false));
                }
                out
            }
            InputAction::MoveRight(true) => {
                self.right_seen_at = Some(frame);
                let mut out = vec![action];
                if self.left_seen_at.take().is_some() {
                    out.push(InputAction::MoveLeft(false));
                }
                out
            }
            InputAction::MoveLeft(false) => {
                self.left_seen_at = None;
                vec![action]
            }
            InputAction::MoveRight(false) => {
                self.right_seen_at = None;
                vec![action]
            }
            other => vec![other],
        }
    }

    /// Releases for keys that have gone quiet for longer than the hold window.
    pub fn expire(&mut self, frame: u64) -> Vec<InputAction> {
        let mut out = Vec::new();
        if self.release_events {
            return out;
        }
        let hold_frames = self.hold_frames;
        let expired = |seen: &mut Option<u64>| match *seen {
            Some(at) if frame.saturating_sub(at) >= hold_frames => {
                *seen = None;
                true
            }
            _ => false,
        };
        if expired(&mut self.left_seen_at) {
            out.push(InputAction::MoveLeft(false));
        }
        if expired(&mut self.right_seen_at) {
            out.push(InputAction::MoveRight(false));
        }
        out
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.get(&frame_count).is_some_and(|queued| !queued.is_empty()))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        match self.events.get_mut(&self.current_frame) {
            Some(queued) if !queued.is_empty() => Ok(queued.remove(0)),
            _ => Ok(Event::Key(KeyCode::Null.into())),
        }
    }
}

/// Scripted session for `--debug`: start, strafe, shoot, quit.
pub fn debug_script() -> HashMap<u64, Vec<Event>> {
    let press = |code: KeyCode| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
    let release = |code: KeyCode| {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release))
    };
    let mut script = HashMap::new();
    script.insert(1, vec![press(KeyCode::Char('p'))]);
    script.insert(2, vec![press(KeyCode::Right), press(KeyCode::Char(' '))]);
    script.insert(40, vec![release(KeyCode::Right)]);
    script.insert(41, vec![press(KeyCode::Char(' '))]);
    script.insert(60, vec![press(KeyCode::Left)]);
    script.insert(120, vec![release(KeyCode::Left), press(KeyCode::Char(' '))]);
    script.insert(180, vec![press(KeyCode::Char(' '))]);
    script.insert(600, vec![press(KeyCode::Char('q'))]);
    script
}

// --- EventSource: the real terminal or a script ---
pub enum EventSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl EventSource {
    /// Everything pending for this frame, without blocking.
    pub fn drain(&mut self, frame_count: u64) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        match self {
            EventSource::Terminal => {
                while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
                }
            }
            EventSource::Simulated(sim_input) => {
                while sim_input.poll(frame_count)? {
                    events.push(sim_input.read()?);
                }
            }
        }
        Ok(events)
    }
}
