//! BoardView: draws a board, its active piece and a status panel into a
//! [`FrameBuffer`].
//!
//! Pure, no terminal I/O, so layouts are unit-testable.

use crate::core::{ActivePiece, Board};
use crate::engine::LoopPhase;
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::Color;

const WELL_BG: Color = Color::new(30, 30, 40);
const BLACK: Color = Color::new(0, 0, 0);

const HELP: &[(&str, &str)] = &[
    ("\u{2190}\u{2192}", "move"),
    ("\u{2193}", "soft drop"),
    ("\u{2191}", "rotate"),
    ("spc", "drop"),
    ("p/u", "pause/resume"),
    ("r", "reset"),
    ("q", "quit"),
];

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

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: &'a Board,
    pub active: Option<&'a ActivePiece>,
    pub phase: LoopPhase,
    /// Row indices currently flashing after a line clear.
    pub flash_rows: &'a [usize],
}

impl<'a> Scene<'a> {
    pub fn new(board: &'a Board, active: Option<&'a ActivePiece>) -> Self {
        Self {
            board,
            active,
            phase: LoopPhase::Running,
            flash_rows: &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct BoardView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the well border plus its outer size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Draw `scene` into `fb`, resizing it to the viewport first.
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board = scene.board;
        let inner_w = board.width() as u16 * self.cell_w;
        let inner_h = board.height() as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(inner_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(inner_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: inner_w + 2,
            h: inner_h + 2,
        };

        draw_border(fb, frame, Style::new(Color::new(200, 200, 200), BLACK));

        let empty = Style::new(Color::new(90, 90, 100), WELL_BG).dim();
        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.fill_cell(fb, frame, x, y, '\u{2588}', block(*color)),
                    None => self.fill_cell(fb, frame, x, y, '\u{b7}', empty),
                }
            }
        }

        if let Some(active) = scene.active {
            for (x, y) in active.cells() {
                if board.get(x, y).is_some() {
                    self.fill_cell(
                        fb,
                        frame,
                        x as usize,
                        y as usize,
                        '\u{2588}',
                        block(active.color).bold(),
                    );
                }
            }
        }

        let flash = Style::new(Color::new(255, 255, 255), WELL_BG).bold();
        for &y in scene.flash_rows {
            if y < board.height() as usize {
                for x in 0..board.width() as usize {
                    self.fill_cell(fb, frame, x, y, '\u{2592}', flash);
                }
            }
        }

        self.draw_side_panel(fb, scene, viewport, frame);

        match scene.phase {
            LoopPhase::Paused => draw_overlay_text(fb, frame, "PAUSED"),
            LoopPhase::Stopped => draw_overlay_text(fb, frame, "STOPPED"),
            LoopPhase::Running => {}
        }
    }

    /// Convenience wrapper allocating a fresh framebuffer.
    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: usize, y: usize, ch: char, style: Style) {
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, scene: &Scene<'_>, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Color::new(200, 200, 200), BLACK);
        let hint = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &scene.phase.as_str().to_uppercase(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BOARD", label);
        y = y.saturating_add(1);
        let dims = format!("{}x{}", scene.board.width(), scene.board.height());
        fb.put_str(panel_x, y, &dims, value);
        y = y.saturating_add(2);

        if let Some(active) = scene.active {
            fb.put_str(panel_x, y, "PIECE", label);
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, &active.kind.as_str().to_uppercase(), Style::new(active.color, BLACK).bold());
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "KEYS", label);
        for (key, what) in HELP {
            y = y.saturating_add(1);
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x.saturating_add(4), y, what, hint);
        }
    }
}

fn block(color: Color) -> Style {
    Style::new(color, WELL_BG)
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: Style) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '\u{250c}', style);
    fb.put_char(right, f.y, '\u{2510}', style);
    fb.put_char(f.x, bottom, '\u{2514}', style);
    fb.put_char(right, bottom, '\u{2518}', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '\u{2500}', style);
        fb.put_char(x, bottom, '\u{2500}', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '\u{2502}', style);
        fb.put_char(right, y, '\u{2502}', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, f: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
    let y = f.y.saturating_add(f.h / 2);
    fb.put_str(x, y, text, Style::new(Color::new(255, 255, 255), BLACK).bold());
}
