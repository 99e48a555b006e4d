/// Terminal renderer — all terminal output lives here.
///
/// Draw calls from the core land in an off-screen 1-bit framebuffer plus a
/// list of text overlays.  `present` then packs two framebuffer rows into
/// each terminal row with half-block glyphs and writes the frame in one go.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_impact::render::{Renderer, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_DARK: Color = Color::Rgb { r: 0x43, g: 0x52, b: 0x3d };
const C_LIGHT: Color = Color::Rgb { r: 0xc7, g: 0xf0, b: 0xd8 };
const C_HINT: Color = Color::DarkGrey;

pub struct TerminalRenderer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    texts: Vec<(usize, usize, String)>,
}

impl TerminalRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(1.0) as usize;
        let height = height.max(1.0) as usize;
        Self { width, height, pixels: vec![false; width * height], texts: Vec::new() }
    }

    fn set(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = true;
        }
    }

    fn lit(&self, x: usize, y: usize) -> bool {
        y < self.height && self.pixels[y * self.width + x]
    }

    /// Write the current frame, centred in the terminal.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let frame_rows = self.height.div_ceil(2);
        let left = (cols as usize).saturating_sub(self.width) / 2;
        let top = (rows as usize).saturating_sub(frame_rows + 1) / 2;

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.queue(style::SetForegroundColor(C_DARK))?;
        out.queue(style::SetBackgroundColor(C_LIGHT))?;

        for row in 0..frame_rows {
            let line: String = (0..self.width)
                .map(|x| match (self.lit(x, row * 2), self.lit(x, row * 2 + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect();
            out.queue(cursor::MoveTo(left as u16, (top + row) as u16))?;
            out.queue(Print(line))?;
        }

        // Text overlays sit on the cell grid, one cell per column and two
        // framebuffer rows per terminal row.
        for (x, y, text) in &self.texts {
            let row = (y / 2).min(frame_rows.saturating_sub(1));
            let room = self.width.saturating_sub(*x);
            let clipped: String = text.chars().take(room).collect();
            out.queue(cursor::MoveTo((left + x) as u16, (top + row) as u16))?;
            out.queue(Print(clipped))?;
        }

        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(left as u16, (top + frame_rows) as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("ARROWS : Move   SPACE : Fire   ENTER : Start   R : Restart   Q : Quit"))?;
        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self) {
        self.pixels.fill(false);
        self.texts.clear();
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        for dy in 0..h.ceil().max(0.0) as i64 {
            for dx in 0..w.ceil().max(0.0) as i64 {
                self.set(x0 + dx, y0 + dy);
            }
        }
    }

    fn draw_sprite(&mut self, x: f32, y: f32, sprite: &Sprite) {
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        for (r, row) in sprite.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    self.set(x0 + c as i64, y0 + r as i64);
                }
            }
        }
    }

    /// Terminal cells have one font size; `size` is ignored.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: Option<u16>) {
        let x = x.max(0.0) as usize;
        let y = y.max(0.0) as usize;
        if x < self.width {
            self.texts.push((x, y, text.to_string()));
        }
    }
}
