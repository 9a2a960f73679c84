/// Rendering layer; all terminal I/O lives here.
///
/// `TerminalCanvas` implements the core's `Renderer` by rasterising
/// world-space draw calls into a character grid scaled to the terminal, then
/// flushing the grid with queued crossterm commands.  No game logic is
/// performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use pantheon::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use pantheon::services::{Renderer, Rgb};

const C_BLANK: Rgb = Rgb(0, 0, 0);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: C_BLANK,
    bg: C_BLANK,
};

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        TerminalCanvas {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    /// Match a new terminal size; the grid is cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            *self = TerminalCanvas::new(cols, rows);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    // ── World → grid mapping ─────────────────────────────────────────────────

    fn cell_w(&self) -> f32 {
        WORLD_WIDTH / self.cols as f32
    }

    fn cell_h(&self) -> f32 {
        WORLD_HEIGHT / self.rows as f32
    }

    fn col_of(&self, x: f32) -> i32 {
        (x / self.cell_w()).floor() as i32
    }

    fn row_of(&self, y: f32) -> i32 {
        (y / self.cell_h()).floor() as i32
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(index)
    }

    fn paint_bg(&mut self, col: i32, row: i32, bg: Rgb) {
        if let Some(cell) = self.cell_mut(col, row) {
            *cell = Cell { ch: ' ', fg: bg, bg };
        }
    }

    fn paint_fg(&mut self, col: i32, row: i32, ch: char, fg: Rgb) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Column/row span covered by `[lo, hi)`, at least one cell wide.
    fn span(lo: f32, hi: f32, cell: f32) -> (i32, i32) {
        let first = (lo / cell).floor() as i32;
        let last = ((hi / cell).ceil() as i32 - 1).max(first);
        (first, last)
    }

    fn plot_path(&mut self, points: impl Iterator<Item = (f32, f32)>, ch: char, fg: Rgb) {
        for (x, y) in points {
            let (col, row) = (self.col_of(x), self.row_of(y));
            self.paint_fg(col, row, ch, fg);
        }
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// Flush the grid to the terminal, batching runs of same-coloured cells.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];

            let mut run = String::new();
            let mut colors = None;
            for cell in line {
                if colors != Some((cell.fg, cell.bg)) {
                    if let Some((fg, bg)) = colors {
                        queue_run(out, &run, fg, bg)?;
                        run.clear();
                    }
                    colors = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            if let Some((fg, bg)) = colors {
                queue_run(out, &run, fg, bg)?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

fn queue_run<W: Write>(out: &mut W, run: &str, fg: Rgb, bg: Rgb) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color(fg)))?;
    out.queue(style::SetBackgroundColor(color(bg)))?;
    out.queue(Print(run))?;
    Ok(())
}

// ── Renderer ─────────────────────────────────────────────────────────────────

impl Renderer for TerminalCanvas {
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let (c0, c1) = Self::span(x, x + w, self.cell_w());
        let (r0, r1) = Self::span(y, y + h, self.cell_h());
        for col in c0..=c1 {
            self.paint_fg(col, r0, '─', color);
            self.paint_fg(col, r1, '─', color);
        }
        for row in r0..=r1 {
            self.paint_fg(c0, row, '│', color);
            self.paint_fg(c1, row, '│', color);
        }
    }

    fn draw_filled_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let (c0, c1) = Self::span(x, x + w, self.cell_w());
        let (r0, r1) = Self::span(y, y + h, self.cell_h());
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.paint_bg(col, row, color);
            }
        }
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        let steps = ((radius * std::f32::consts::TAU) / self.cell_w().min(self.cell_h()))
            .ceil()
            .max(8.0) as u32;
        let points = (0..steps).map(|i| {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            (cx + a.cos() * radius, cy + a.sin() * radius)
        });
        self.plot_path(points, '·', color);
    }

    fn draw_filled_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        let (cw, ch) = (self.cell_w(), self.cell_h());
        let (c0, c1) = Self::span(cx - radius, cx + radius, cw);
        let (r0, r1) = Self::span(cy - radius, cy + radius, ch);
        let mut painted = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                let dx = (col as f32 + 0.5) * cw - cx;
                let dy = (row as f32 + 0.5) * ch - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.paint_bg(col, row, color);
                    painted = true;
                }
            }
        }
        if !painted {
            // Smaller than a cell: still show something.
            let (col, row) = (self.col_of(cx), self.row_of(cy));
            self.paint_fg(col, row, '•', color);
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb) {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let ch = if dy.abs() < f32::EPSILON {
            '─'
        } else if dx.abs() < f32::EPSILON {
            '│'
        } else if (dx > 0.0) == (dy > 0.0) {
            '╲'
        } else {
            '╱'
        };
        let step = self.cell_w().min(self.cell_h()) / 2.0;
        let steps = ((dx * dx + dy * dy).sqrt() / step).ceil().max(1.0) as u32;
        let points = (0..=steps).map(|i| {
            let t = i as f32 / steps as f32;
            (x1 + dx * t, y1 + dy * t)
        });
        self.plot_path(points, ch, color);
    }

    fn draw_text(&mut self, text: &str, cx: f32, cy: f32, color: Rgb) {
        let row = self.row_of(cy);
        let start = self.col_of(cx) - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.paint_fg(start + i as i32, row, ch, color);
        }
    }
}
