//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::template_shape;
use crate::core::{CategoryProgress, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const BOARD_BG: Rgb = Rgb::new(24, 24, 32);
const PANEL_MIN_W: u16 = 16;
const PROGRESS_BAR_W: u16 = 6;

/// Pure renderer for the skills game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self { cell_w: 2 }
    }
}

/// Screen position of the board frame.
#[derive(Debug, Clone, Copy)]
struct BoardFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 + 2;
        let panel_w = PANEL_MIN_W + 8;
        let frame = BoardFrame {
            x: viewport.width.saturating_sub(w + panel_w) / 2,
            y: viewport.height.saturating_sub(h + 1) / 2,
            w,
            h,
        };

        self.draw_board(fb, snap, frame);
        self.draw_side_panel(fb, snap, viewport, frame);
        self.draw_reveal_banner(fb, snap, frame);

        if snap.game_over {
            self.draw_overlay(fb, frame, "GAME OVER", Some("r: new game"));
        } else if snap.paused {
            self.draw_overlay(fb, frame, "PAUSED", Some("p: resume"));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: BoardFrame) {
        let empty = Style::new(Rgb::new(70, 70, 84), BOARD_BG).dim();
        let flash = Style::new(Rgb::new(255, 255, 255), BOARD_BG).bold();

        fb.draw_box(frame.x, frame.y, frame.w, frame.h, Style::default());

        for y in 0..BOARD_HEIGHT as usize {
            let flashing = snap.is_row_clearing(y);
            for x in 0..BOARD_WIDTH as usize {
                let (ch, style) = match snap.cell_at(x, y) {
                    Some(_) if flashing => ('▓', flash),
                    Some(kind) => ('█', piece_style(kind)),
                    None => ('·', empty),
                };
                let px = frame.x + 1 + x as u16 * self.cell_w;
                let py = frame.y + 1 + y as u16;
                fb.fill_rect(px, py, self.cell_w, 1, ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < PANEL_MIN_W {
            return;
        }
        let panel_w = viewport.width - x;

        let label = Style::default().bold();
        let value = Style::default();
        let mut y = frame.y;

        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x + 7, y, n, value);
            y += 1;
        }
        y += 1;

        fb.put_str(x, y, "HOLD", label);
        if !snap.can_hold && !snap.game_over {
            fb.put_str(x + 5, y, "(used)", value.dim());
        }
        y += 1;
        match snap.hold {
            Some(kind) => self.draw_mini_piece(fb, x, y, kind),
            None => {
                fb.put_str(x, y, "-", value.dim());
            }
        }
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for kind in snap.next_queue {
            self.draw_mini_piece(fb, x, y, kind);
            y += 3;
        }

        fb.put_str(x, y, "SKILLS", label);
        let written = fb.put_u32(x + 7, y, snap.discovered.len() as u32, value);
        fb.put_char(x + 7 + written, y, '/', value);
        fb.put_u32(x + 8 + written, y, snap.total_skills as u32, value);
        y += 1;

        for progress in &snap.progress {
            if y >= viewport.height {
                break;
            }
            draw_progress_line(fb, x, y, panel_w, progress);
            y += 1;
        }
    }

    /// Template-orientation preview, two columns per cell.
    fn draw_mini_piece(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = piece_style(kind);
        for (dx, dy) in template_shape(kind).minos() {
            let px = x + dx as u16 * 2;
            fb.fill_rect(px, y + dy as u16, 2, 1, '█', style);
        }
    }

    fn draw_reveal_banner(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: BoardFrame) {
        let Some(reveal) = &snap.reveal else {
            return;
        };
        let text = format!(
            "+ {} ({}) - {}",
            reveal.skill,
            reveal.level.as_str(),
            reveal.category_name
        );
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(40, 90, 60)).bold();
        let y = frame.y.saturating_add(frame.h);
        fb.put_str(frame.x, y, &text, style);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: BoardFrame, title: &str, hint: Option<&str>) {
        let mid_y = frame.y + frame.h / 2;
        let title_style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        put_centered(fb, frame, mid_y, title, title_style);
        if let Some(hint) = hint {
            put_centered(fb, frame, mid_y + 1, hint, Style::default().dim());
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, frame: BoardFrame, y: u16, text: &str, style: Style) {
    let text_w = text.chars().count() as u16;
    let x = frame.x + frame.w.saturating_sub(text_w) / 2;
    fb.put_str(x, y, text, style);
}

fn draw_progress_line(fb: &mut FrameBuffer, x: u16, y: u16, panel_w: u16, progress: &CategoryProgress) {
    let counts_w = 6;
    let name_w = panel_w.saturating_sub(PROGRESS_BAR_W + counts_w + 2);
    fb.put_str_clipped(x, y, &progress.name, name_w, Style::default());

    let bar_x = x + name_w + 1;
    let filled = (u32::from(PROGRESS_BAR_W) * u32::from(progress.percent()) / 100) as u16;
    let on = Style::new(Rgb::new(120, 200, 140), Rgb::new(0, 0, 0));
    let off = Style::default().dim();
    for i in 0..PROGRESS_BAR_W {
        let (ch, style) = if i < filled { ('█', on) } else { ('░', off) };
        fb.put_char(bar_x + i, y, ch, style);
    }

    let count_x = bar_x + PROGRESS_BAR_W + 1;
    let written = fb.put_u32(count_x, y, progress.revealed, Style::default());
    fb.put_char(count_x + written, y, '/', Style::default());
    fb.put_u32(count_x + written + 1, y, progress.total, Style::default());
}

fn piece_style(kind: PieceKind) -> Style {
    Style::new(Rgb::for_tag(kind.color()), BOARD_BG).bold()
}
