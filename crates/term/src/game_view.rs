//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, GameStatus};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{BlockColor, COLUMNS, ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board origin inside the viewport, border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal renderer for the playfield, score panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Outer size of the bordered board.
    pub fn frame_size(&self) -> (u16, u16) {
        (COLUMNS as u16 * self.cell_w + 2, ROWS as u16 + 2)
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);

        let (w, h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);
        for (y, row) in snap.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(color) => ('█', Style::new(color_rgb(*color), BOARD_BG).bold()),
                    None => ('·', Style::new(Rgb::new(70, 70, 80), BOARD_BG)),
                };
                let px = frame.x + 1 + x as u16 * self.cell_w;
                fb.fill_rect(px, frame.y + 1 + y as u16, self.cell_w, 1, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status() {
            GameStatus::Paused => self.draw_overlay(fb, frame, &["PAUSED"]),
            GameStatus::GameOver => {
                let score = format!("SCORE {}", snap.score);
                self.draw_overlay(fb, frame, &["GAME OVER", score.as_str(), "R: NEW GAME"]);
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        fb.fill_rect(f.x + 1, f.y, f.w - 2, 1, '─', style);
        fb.fill_rect(f.x + 1, bottom, f.w - 2, 1, '─', style);
        fb.fill_rect(f.x, f.y + 1, 1, f.h - 2, '│', style);
        fb.fill_rect(right, f.y + 1, 1, f.h - 2, '│', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, vp: Viewport, f: Frame) {
        let x = f.x.saturating_add(f.w).saturating_add(2);
        if vp.width.saturating_sub(x) < 12 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = Style::new(Rgb::new(120, 120, 120), PANEL_BG);

        fb.put_str(x, f.y, "SCORE", label);
        fb.put_str(x, f.y + 1, &snap.score.to_string(), value);

        let state = match snap.status() {
            GameStatus::Playing => "PLAYING",
            GameStatus::Paused => "PAUSED",
            GameStatus::GameOver => "OVER",
        };
        fb.put_str(x, f.y + 3, "STATE", label);
        fb.put_str(x, f.y + 4, state, value);

        let keys = [
            "←/→  move",
            "↓    step",
            "↑    rotate",
            "z    rotate ccw",
            "spc  drop",
            "esc  pause",
            "r    restart",
            "q    quit",
        ];
        for (i, line) in keys.iter().enumerate() {
            fb.put_str(x, f.y + 6 + i as u16, line, hint);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, lines: &[&str]) {
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = (f.y + f.h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let w = text.chars().count() as u16;
            let x = f.x + f.w.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

/// Terminal color for a palette token.
pub fn color_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Cyan => Rgb::new(80, 220, 220),
        BlockColor::Blue => Rgb::new(80, 120, 220),
        BlockColor::Orange => Rgb::new(255, 165, 0),
        BlockColor::Yellow => Rgb::new(240, 220, 80),
        BlockColor::Green => Rgb::new(100, 220, 120),
        BlockColor::Pink => Rgb::new(240, 130, 200),
        BlockColor::Red => Rgb::new(220, 80, 80),
    }
}
