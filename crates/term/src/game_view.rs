//! GameView: maps one or two sessions into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{PairSnapshot, Session, SessionSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Puyo, PuyoColor, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_W: u16 = 12;
const GAP: u16 = 3;

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

/// One board to draw, with its caption and the latest chain callout
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub session: &'a Session,
    pub title: &'a str,
    pub callout: Option<&'a str>,
}

/// A lightweight terminal renderer for the boards.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render every panel side by side into an existing framebuffer.
    pub fn render_into(&self, panels: &[Panel<'_>], viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size();
        let block_w = frame_w + 2 + PANEL_W;
        let n = panels.len() as u16;
        let total_w = n * block_w + n.saturating_sub(1) * GAP;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        // One row above the frame for the title.
        let start_y = viewport.height.saturating_sub(frame_h + 1) / 2 + 1;

        let mut snap = SessionSnapshot::default();
        for (i, panel) in panels.iter().enumerate() {
            let x = start_x + i as u16 * (block_w + GAP);
            panel.session.snapshot_into(&mut snap);
            self.draw_panel(fb, panel, &snap, x, start_y);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, panels: &[Panel<'_>], viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(panels, viewport, &mut fb);
        fb
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        panel: &Panel<'_>,
        snap: &SessionSnapshot,
        x: u16,
        y: u16,
    ) {
        let (frame_w, frame_h) = self.frame_size();
        let label = CellStyle::default().bold();

        fb.put_str_centered(x, frame_w, y.saturating_sub(1), panel.title, label);
        fb.fill_rect(
            x + 1,
            y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::fg_on(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, x, y, frame_w, frame_h, CellStyle::default());

        let dot = CellStyle::fg_on(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for by in 0..BOARD_HEIGHT as i8 {
            for bx in 0..BOARD_WIDTH as i8 {
                self.fill_cell(fb, x, y, bx, by, '·', dot);
            }
        }

        // Settled cells, lifted by their remaining fall offset.
        for by in 0..BOARD_HEIGHT as i8 {
            for bx in 0..BOARD_WIDTH as i8 {
                let Some(puyo) = Puyo::from_code(snap.board[by as usize][bx as usize]) else {
                    continue;
                };
                let lift = panel.session.fall_offset(bx, by).round() as i8;
                let (ch, style) = puyo_glyph(puyo, 0.0);
                self.fill_cell(fb, x, y, bx, by - lift, ch, style);
            }
        }

        // Popping cells.
        for fx in panel.session.pop_effects().iter() {
            let ch = if fx.scale() >= 1.0 {
                '✦'
            } else if fx.scale() >= 0.4 {
                '*'
            } else {
                '·'
            };
            let (_, style) = puyo_glyph(fx.puyo, fx.brightness());
            self.fill_cell(fb, x, y, fx.x, fx.y, ch, style.bold());
        }

        if let Some(pair) = snap.current {
            for (px, py, color) in pair_cells(&pair) {
                let (ch, style) = puyo_glyph(Puyo::Colored(color), 0.15);
                self.fill_cell(fb, x, y, px, py, ch, style.bold());
            }
        }

        self.draw_side(fb, snap, x + frame_w + 2, y);

        let mid = y + frame_h / 2;
        if snap.game_over() {
            fb.put_str_centered(x, frame_w, mid, "GAME OVER", label);
        } else if let Some(text) = panel.callout {
            let style = CellStyle::fg_on(Rgb::new(255, 220, 80), PLAY_BG).bold();
            fb.put_str_centered(x, frame_w, mid, text, style);
        }
    }

    fn draw_side(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        let label = CellStyle::default().bold();
        let value = CellStyle::fg_on(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.put_str(x, y, "NEXT", label);
        let next = snap.next;
        for (i, color) in [next.child, next.pivot].into_iter().enumerate() {
            let (ch, style) = puyo_glyph(Puyo::Colored(color), 0.0);
            fb.fill_rect(x + 1, y + 1 + i as u16, self.cell_w, 1, ch, style);
        }

        let rows: [(&str, u32); 3] = [
            ("SCORE", snap.score),
            ("CHAIN", snap.chain),
            ("OJAMA", snap.pending_garbage),
        ];
        for (i, (name, v)) in rows.into_iter().enumerate() {
            let row = y + 4 + i as u16 * 2;
            fb.put_str(x, row, name, label);
            fb.put_u32(x, row + 1, v, value);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        bx: i8,
        by: i8,
        ch: char,
        style: CellStyle,
    ) {
        if bx < 0 || by < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame_x + 1 + bx as u16 * self.cell_w;
        let py = frame_y + 1 + by as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(right, y + dy, '│', style);
    }
}

fn pair_cells(pair: &PairSnapshot) -> [(i8, i8, PuyoColor); 2] {
    let (dx, dy) = pair.orientation.child_offset();
    [
        (pair.x, pair.y, pair.pivot),
        (pair.x + dx, pair.y + dy, pair.child),
    ]
}

fn color_rgb(color: PuyoColor) -> Rgb {
    match color {
        PuyoColor::Red => Rgb::new(230, 70, 70),
        PuyoColor::Green => Rgb::new(90, 210, 100),
        PuyoColor::Blue => Rgb::new(80, 120, 230),
        PuyoColor::Yellow => Rgb::new(240, 220, 80),
        PuyoColor::Purple => Rgb::new(190, 110, 220),
        PuyoColor::Cyan => Rgb::new(80, 220, 220),
    }
}

fn puyo_glyph(puyo: Puyo, brightness: f32) -> (char, CellStyle) {
    let (fg, ch) = match puyo {
        Puyo::Colored(color) => (color_rgb(color), '█'),
        Puyo::Garbage => (Rgb::new(150, 150, 160), '▒'),
    };
    (ch, CellStyle::fg_on(fg.lighten(brightness), PLAY_BG))
}
