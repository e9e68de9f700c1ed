//! GameView: draws a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::theme::{piece_color, Theme};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_BG: Rgb = Rgb::from_hex(0x0f0f0f);
const GRID_FG: Rgb = Rgb::from_hex(0x27272a);
const PANEL_BG: Rgb = Rgb::from_hex(0x18181b);
/// 20% white over the board background.
const GHOST_FG: Rgb = Rgb::new(63, 63, 63);
const TEXT_FG: Rgb = Rgb::new(220, 220, 220);

/// Side length of the next-piece preview box, in board cells.
const PREVIEW_CELLS: u16 = 4;

const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Brightness of the line-clear flash after `elapsed_ms`, in 0..=1.
pub fn flash_intensity(elapsed_ms: u32) -> f32 {
    (elapsed_ms as f32 / 50.0).sin().abs()
}

/// Terminal renderer for the board, side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    theme: Theme,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

/// Where the board frame sits inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
            theme: Theme::Default,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Reusing one buffer across frames keeps this allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let accent = self.theme.accent();

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::plain(TEXT_FG, BOARD_BG),
        );
        draw_border(fb, frame, CellStyle::plain(accent, Rgb::default()));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match PieceKind::from_id(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_block(fb, frame, x as i8, y as i8, kind),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as i8,
                        y as i8,
                        EMPTY,
                        CellStyle {
                            dim: true,
                            ..CellStyle::plain(GRID_FG, BOARD_BG)
                        },
                    ),
                }
            }
        }

        if snap.clearing() {
            // The falling piece is hidden while rows flash.
            self.draw_flash(fb, frame, snap);
        } else if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::plain(GHOST_FG, BOARD_BG);
                for (x, y) in active.cells_at(ghost_y) {
                    self.fill_cell(fb, frame, x, y, GHOST, ghost);
                }
            }
            for (x, y) in active.cells_at(active.y) {
                self.draw_block(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused() {
            draw_overlay(fb, frame, &["PAUSED"], None);
        } else if snap.game_over() {
            draw_overlay(fb, frame, &["GAME OVER", "SCORE"], Some(snap.score));
        }
    }

    /// Convenience wrapper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    /// Fill one board cell; cells outside the board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(piece_color(kind), BOARD_BG)
        };
        self.fill_cell(fb, frame, x, y, BLOCK, style);
    }

    fn draw_flash(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let alpha = flash_intensity(snap.clear_elapsed_ms);
        let bg = BOARD_BG.mix(Rgb::WHITE, alpha);

        for (y, _) in snap.clearing_rows.iter().enumerate().filter(|&(_, &on)| on) {
            for x in 0..BOARD_WIDTH {
                let base = PieceKind::from_id(snap.board[y][x as usize])
                    .map_or(BOARD_BG, piece_color);
                let style = CellStyle {
                    bold: true,
                    ..CellStyle::plain(base.mix(Rgb::WHITE, alpha), bg)
                };
                self.fill_cell(fb, frame, x as i8, y as i8, BLOCK, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        let preview_w = PREVIEW_CELLS * self.cell_w;
        if panel_x >= viewport.width || viewport.width - panel_x < preview_w.max(12) {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(self.theme.accent(), Rgb::default())
        };
        let value = CellStyle::plain(TEXT_FG, Rgb::default());

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next, &snap.next_shape);
        y = y.saturating_add(PREVIEW_CELLS * self.cell_h + 1);

        fb.put_str(panel_x, y, "THEME", label);
        fb.put_str(panel_x, y + 1, self.theme.name(), value);
    }

    /// Next piece centred in a 4x4 box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, shape: &Shape) {
        let box_w = PREVIEW_CELLS * self.cell_w;
        let box_h = PREVIEW_CELLS * self.cell_h;
        fb.fill_rect(x, y, box_w, box_h, ' ', CellStyle::plain(TEXT_FG, PANEL_BG));

        let spare = PREVIEW_CELLS.saturating_sub(shape.size() as u16);
        let off_x = spare * self.cell_w / 2;
        let off_y = spare * self.cell_h / 2;
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(piece_color(kind), PANEL_BG)
        };

        for (dx, dy) in shape.minos() {
            let px = x + off_x + (dx as u16) * self.cell_w;
            let py = y + off_y + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centre a few lines of text over the board. `number` is appended to the
/// last line.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str], number: Option<u32>) {
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::WHITE, Rgb::default())
    };
    let top = frame.y + frame.h / 2 - (lines.len() as u16) / 2;

    for (i, text) in lines.iter().enumerate() {
        let y = top + i as u16;
        let is_last = i + 1 == lines.len();
        let digits = match number {
            Some(n) if is_last => digit_count(n) + 1,
            _ => 0,
        };
        let text_w = text.chars().count() as u16 + digits;
        let x = frame.x + frame.w.saturating_sub(text_w) / 2;

        let end = fb.put_str(x, y, text, style);
        if let (true, Some(n)) = (is_last, number) {
            fb.put_char(end, y, ' ', style);
            fb.put_u32(end + 1, y, n, style);
        }
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
