use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
    Command,
};

use crate::constants::TEXT_COLOR;
use crate::types::Rect;

/// Plain-character copy of what a terminal would show, for headless runs.
pub struct FrameCapture {
    rows: Vec<Vec<char>>,
    cursor: (usize, usize),
}

impl FrameCapture {
    pub fn new(width: u16, height: u16) -> Self {
        FrameCapture {
            rows: vec![vec![' '; width as usize]; height as usize],
            cursor: (0, 0),
        }
    }

    fn move_to(&mut self, column: u16, row: u16) {
        self.cursor = (column as usize, row as usize);
    }

    /// Writes at the cursor and advances it; anything past the right edge is lost.
    fn write_str(&mut self, text: &str) {
        let (mut column, row) = self.cursor;
        if let Some(line) = self.rows.get_mut(row) {
            for ch in text.chars() {
                if let Some(cell) = line.get_mut(column) {
                    *cell = ch;
                }
                column += 1;
            }
        }
        self.cursor = (column, row);
    }

    pub fn row_text(&self, row: u16) -> String {
        self.rows
            .get(row as usize)
            .map(|line| line.iter().collect())
            .unwrap_or_default()
    }

    fn log_frame(&self) {
        info!("--- Frame ---");
        for line in &self.rows {
            info!("{}", line.iter().collect::<String>());
        }
        info!("-------------");
    }
}

/// Where frames go: the real terminal, or a capture when running headless.
pub enum Screen {
    Terminal(io::Stdout),
    Headless(FrameCapture),
}

impl Screen {
    pub fn move_cursor(&mut self, column: u16, row: u16) -> io::Result<()> {
        match self {
            Screen::Terminal(out) => queue!(out, MoveTo(column, row)),
            Screen::Headless(capture) => {
                capture.move_to(column, row);
                Ok(())
            }
        }
    }

    /// Queues a styling or cursor-visibility command. A capture only keeps characters.
    pub fn queue(&mut self, command: impl Command) -> io::Result<()> {
        match self {
            Screen::Terminal(out) => queue!(out, command),
            Screen::Headless(_) => Ok(()),
        }
    }

    pub fn log_frame(&self) {
        if let Screen::Headless(capture) = self {
            capture.log_frame();
        }
    }
}

impl Write for Screen {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Screen::Terminal(out) => out.write(buf),
            Screen::Headless(capture) => {
                capture.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Screen::Terminal(out) => out.flush(),
            Screen::Headless(_) => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { ch: ' ', color: TEXT_COLOR }
    }
}

// --- GameGrid: one frame composed off-screen, then written row by row ---
pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![Cell::default(); width as usize]; height as usize],
            width,
            height,
        }
    }

    /// Off-grid coordinates (including negative ones) are dropped.
    pub fn set_char(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if x >= 0 && y >= 0 && (y as u16) < self.height && (x as u16) < self.width {
            self.grid[y as usize][x as usize] = Cell { ch, color };
        }
    }

    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set_char(x + i as i32, y, ch, color);
        }
    }

    pub fn draw_sprite(&mut self, rect: &Rect, rows: &[&str], color: Color) {
        for (dy, line) in rows.iter().enumerate() {
            self.draw_text(rect.x, rect.y + dy as i32, line, color);
        }
    }

    pub fn fill_rect(&mut self, rect: &Rect, ch: char, color: Color) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.set_char(x, y, ch, color);
            }
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(Cell::default());
        }
    }

    pub fn row_text(&self, y: u16) -> String {
        self.grid
            .get(y as usize)
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .unwrap_or_default()
    }

    pub fn render(&self, screen: &mut Screen, bg_color: Color) -> io::Result<()> {
        screen.queue(SetBackgroundColor(bg_color))?;
        for y in 0..self.height {
            screen.move_cursor(0, y)?;
            let row = &self.grid[y as usize];
            let mut start = 0;
            while start < row.len() {
                let color = row[start].color;
                let end = row[start..]
                    .iter()
                    .position(|cell| cell.color != color)
                    .map_or(row.len(), |offset| start + offset);
                screen.queue(SetForegroundColor(color))?;
                let run: String = row[start..end].iter().map(|cell| cell.ch).collect();
                write!(screen, "{}", run)?;
                start = end;
            }
        }
        screen.queue(ResetColor)
    }

    pub fn clear_screen_manual(&self, screen: &mut Screen) -> io::Result<()> {
        let blank = " ".repeat(self.width as usize);
        for y in 0..self.height {
            screen.move_cursor(0, y)?;
            write!(screen, "{}", blank)?;
        }
        screen.move_cursor(0, 0)?;
        screen.flush()
    }
}
