//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared against the previous one and only runs of glyphs
//! that changed are rewritten. A size change or an explicit invalidation
//! triggers a full repaint.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`Self::enter`]. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full repaint on the next draw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = self
            .last
            .as_ref()
            .is_some_and(|prev| prev.width() == fb.width() && prev.height() == fb.height());

        if same_size {
            if let Some(prev) = &self.last {
                for (y, span) in changed_spans(prev, fb) {
                    encode_span(fb, y, span, &mut self.buf)?;
                }
            }
        } else {
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..fb.height() {
                encode_span(fb, y, 0..fb.width(), &mut self.buf)?;
            }
        }

        if !self.buf.is_empty() {
            self.buf.queue(SetAttribute(Attribute::Reset))?;
            self.buf.queue(ResetColor)?;
            self.flush_buf()?;
        }

        match &mut self.last {
            Some(prev) => prev.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Maximal runs of differing glyphs between two same-sized frames, as
/// `(row, columns)`.
pub fn changed_spans(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, Range<u16>)> {
    let mut spans = Vec::new();
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let differs = old.get(x as usize) != new.get(x as usize);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    spans.push((y, s..x));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push((y, s..next.width()));
        }
    }
    spans
}

/// Encode one run of a row into `out`, switching style only when it changes.
pub fn encode_span(fb: &FrameBuffer, y: u16, span: Range<u16>, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(span.start, y))?;
    let row = fb.row(y);
    let mut current: Option<Style> = None;
    for &Glyph { ch, style } in &row[span.start as usize..span.end as usize] {
        if current != Some(style) {
            apply_style(out, current, style)?;
            current = Some(style);
        }
        out.queue(Print(ch))?;
    }
    Ok(())
}

fn apply_style(out: &mut Vec<u8>, prev: Option<Style>, style: Style) -> Result<()> {
    // Dropping bold needs a full attribute reset, which also clears colors.
    let reset = prev.map_or(true, |p| p.bold && !style.bold);
    if reset {
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    if reset || prev.map(|p| p.fg) != Some(style.fg) {
        out.queue(SetForegroundColor(to_color(style.fg)))?;
    }
    if reset || prev.map(|p| p.bg) != Some(style.bg) {
        out.queue(SetBackgroundColor(to_color(style.bg)))?;
    }
    if style.bold && prev.map_or(true, |p| !p.bold || reset) {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
