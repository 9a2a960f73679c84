/// Axis-aligned rectangles used for every hitbox in the world.
///
/// Coordinates are world pixels with y growing downward, so `bottom()` is the
/// larger y value.  Width and height never go negative.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Rectangle of the given size whose centre sits on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x(), self.center_y())
    }

    // ── Edge snapping ────────────────────────────────────────────────────────

    pub fn set_left(&mut self, x: f32) {
        self.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.x = x - self.w;
    }

    pub fn set_top(&mut self, y: f32) {
        self.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    /// Strict overlap: rectangles that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Half-open containment (left/top edges inside, right/bottom outside).
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Euclidean distance between the top-left corners of two rectangles.
    pub fn origin_distance(&self, other: &Rect) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance from this rectangle's centre to a point.
    pub fn center_distance_to(&self, px: f32, py: f32) -> f32 {
        let dx = self.center_x() - px;
        let dy = self.center_y() - py;
        (dx * dx + dy * dy).sqrt()
    }
}
