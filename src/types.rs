/// Axis-aligned rectangle in screen cells. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn set_mid_top(&mut self, (cx, top): (i32, i32)) {
        self.x = cx - self.width / 2;
        self.y = top;
    }

    pub fn mid_top(&self) -> (i32, i32) {
        (self.center_x(), self.y)
    }

    pub fn set_mid_bottom(&mut self, (cx, bottom): (i32, i32)) {
        self.x = cx - self.width / 2;
        self.y = bottom - self.height;
    }

    pub fn set_center(&mut self, (cx, cy): (i32, i32)) {
        self.x = cx - self.width / 2;
        self.y = cy - self.height / 2;
    }

    pub fn collides_with(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Rounds a float coordinate onto the cell grid.
pub fn to_cell(value: f64) -> i32 {
    value.round() as i32
}
