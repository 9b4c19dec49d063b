use crate::constants::*;
use crate::rendering::GameGrid;
use crate::settings::Settings;
use crate::types::Rect;

pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    pub fn new(settings: &Settings, label: &str) -> Self {
        let mut rect = Rect::new(0, 0, BUTTON_WIDTH, BUTTON_HEIGHT);
        rect.set_center((settings.screen_width / 2, settings.screen_height / 2));
        Button { rect, label: label.to_string() }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rect.contains_point(column as i32, row as i32)
    }

    pub fn draw_button(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.rect, ' ', BUTTON_COLOR);
        for x in self.rect.left()..self.rect.right() {
            game_grid.set_char(x, self.rect.top(), '=', BUTTON_COLOR);
            game_grid.set_char(x, self.rect.bottom() - 1, '=', BUTTON_COLOR);
        }
        let label_len = self.label.chars().count() as i32;
        let label_x = self.rect.x + (self.rect.width - label_len) / 2;
        let label_y = self.rect.y + self.rect.height / 2;
        game_grid.draw_text(label_x, label_y, &self.label, TEXT_COLOR);
    }
}
