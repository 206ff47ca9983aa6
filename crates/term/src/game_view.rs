//! GameView: maps a snake `GameState` into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts are unit-tested against the text of the frame.

use crate::core::{next_interval_ms, EndReason, GameState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, SpeedTier};

const PLAYFIELD_BG: Rgb = Rgb::new(25, 30, 25);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

pub const HEAD_GLYPH: char = '█';
pub const BODY_GLYPH: char = '▓';
pub const FOOD_GLYPH: char = '●';

const KEY_HINTS: &str = "arrows/wasd move  p pause  r restart  q quit";

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

/// Session details shown next to the board that are not part of `GameState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud<'a> {
    pub player: &'a str,
    pub tier: SpeedTier,
    /// Best score in the ledger when the session started.
    pub best: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Columns and rows the bordered board needs.
    pub fn frame_size(&self, state: &GameState) -> (u16, u16) {
        let board = state.board();
        (
            board.width.saturating_mul(self.cell_w).saturating_add(2),
            board.height.saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, state: &GameState, hud: &Hud<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let (frame_w, frame_h) = self.frame_size(state);
        // One row under the frame for key hints.
        if frame_w > viewport.width || frame_h + 1 > viewport.height {
            let msg = "Terminal too small";
            let style = CellStyle::default().bold();
            fb.put_str(0, 0, msg, style);
            return;
        }

        let start_x = (viewport.width - frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => (viewport.height - frame_h - 1) / 2,
            AnchorY::Top => 0,
        };

        let field = CellStyle::new(Rgb::new(70, 80, 70), PLAYFIELD_BG).dim();
        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', field);
        draw_border(fb, start_x, start_y, frame_w, frame_h);

        if let Some(food) = state.food() {
            let style = CellStyle::new(Rgb::new(230, 70, 70), PLAYFIELD_BG).bold();
            self.fill_cell(fb, start_x, start_y, food.position, FOOD_GLYPH, style);
        }

        let snake_color = if state.terminal() && !state.end_reason().is_some_and(|r| r.is_win()) {
            Rgb::new(150, 150, 150)
        } else {
            Rgb::new(90, 210, 110)
        };
        let body_style = CellStyle::new(snake_color, PLAYFIELD_BG);
        for &segment in state.snake().body() {
            self.fill_cell(fb, start_x, start_y, segment, BODY_GLYPH, body_style);
        }
        self.fill_cell(
            fb,
            start_x,
            start_y,
            state.snake().head(),
            HEAD_GLYPH,
            body_style.bold(),
        );

        let hint_style = CellStyle::default().dim();
        let hint_x = start_x + frame_w.saturating_sub(KEY_HINTS.chars().count() as u16) / 2;
        fb.put_str(hint_x, start_y + frame_h, KEY_HINTS, hint_style);

        self.draw_side_panel(fb, state, hud, viewport, start_x + frame_w, start_y);

        if let Some(text) = overlay_text(state) {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, hud, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        p: Position,
        ch: char,
        style: CellStyle,
    ) {
        let (Ok(x), Ok(y)) = (u16::try_from(p.x), u16::try_from(p.y)) else {
            return;
        };
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        hud: &Hud<'_>,
        viewport: Viewport,
        frame_right: u16,
        start_y: u16,
    ) {
        let panel_x = frame_right.saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let rows = [
            ("SCORE", state.score().to_string()),
            ("LENGTH", state.snake_length().to_string()),
            (
                "SPEED",
                format!("{}ms", next_interval_ms(&hud.tier, state.score())),
            ),
            ("TIER", hud.tier.label.to_string()),
            ("BEST", hud.best.max(state.score()).to_string()),
            ("PLAYER", hud.player.to_string()),
        ];

        // Pairs are packed one row closer on short terminals.
        let spacing: u16 = if viewport.height >= 17 { 3 } else { 2 };
        let needed = spacing * rows.len() as u16 - (spacing - 2);
        let mut y = start_y.min(viewport.height.saturating_sub(needed));
        for (name, text) in rows {
            if y.saturating_add(1) >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &text, value);
            y = y.saturating_add(spacing);
        }
    }
}

fn overlay_text(state: &GameState) -> Option<&'static str> {
    match state.end_reason() {
        Some(EndReason::BoardFilled) => Some("YOU WIN"),
        Some(_) => Some("GAME OVER"),
        None if state.paused() => Some("PAUSED"),
        None => None,
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

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

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let padded = format!(" {} ", text);
    let text_w = padded.chars().count() as u16;
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x + w.saturating_sub(text_w) / 2, y + h / 2, &padded, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Snake;
    use crate::types::{BoardSize, Direction};

    fn hud() -> Hud<'static> {
        Hud {
            player: "Ana",
            tier: SpeedTier::NORMAL,
            best: 12,
        }
    }

    fn count(fb: &FrameBuffer, ch: char) -> usize {
        fb.to_text().chars().filter(|&c| c == ch).count()
    }

    fn sample() -> GameState {
        let snake = Snake::with_body(
            Position::new(3, 2),
            [Position::new(1, 2), Position::new(2, 2)],
            Direction::Right,
        );
        GameState::from_parts(BoardSize::new(8, 6), snake, Position::new(6, 4), 5, 1)
    }

    #[test]
    fn test_draws_snake_and_food() {
        let fb = GameView::default().render(&sample(), &hud(), Viewport::new(60, 12));
        assert_eq!(count(&fb, HEAD_GLYPH), 2);
        assert_eq!(count(&fb, BODY_GLYPH), 4);
        assert_eq!(count(&fb, FOOD_GLYPH), 2);
        assert_eq!(count(&fb, '┌'), 1);
    }

    #[test]
    fn test_head_position_in_frame() {
        // Frame 18x8 in a 18x9 viewport sits at the origin.
        let fb = GameView::default().render(&sample(), &hud(), Viewport::new(18, 9));
        let row = fb.row_text(1 + 2);
        let chars: Vec<char> = row.chars().collect();
        assert_eq!(chars[1 + 3 * 2], HEAD_GLYPH);
        assert_eq!(chars[1 + 3 * 2 + 1], HEAD_GLYPH);
        assert_eq!(chars[1 + 2 * 2], BODY_GLYPH);
    }

    #[test]
    fn test_side_panel_values() {
        let fb = GameView::default().render(&sample(), &hud(), Viewport::new(60, 20));
        let text = fb.to_text();
        assert!(text.contains("SCORE"));
        assert!(text.contains("LENGTH"));
        assert!(text.contains("335ms"));
        assert!(text.contains("Normal"));
        assert!(text.contains("Ana"));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_side_panel_fits_short_viewport() {
        let fb = GameView::default().render(&sample(), &hud(), Viewport::new(60, 12));
        let text = fb.to_text();
        assert!(text.contains("SCORE"));
        assert!(text.contains("BEST"));
        assert!(text.contains("PLAYER"));
        assert!(text.contains("Ana"));
        assert!(fb.row_text(11).trim_end().ends_with("Ana"));
    }

    #[test]
    fn test_overlays() {
        let view = GameView::default();
        let vp = Viewport::new(60, 20);

        let paused = sample().with_paused(true);
        assert!(view.render(&paused, &hud(), vp).to_text().contains("PAUSED"));

        let mut over = sample().change_direction(Direction::Up);
        for _ in 0..5 {
            over = over.advance();
        }
        assert!(over.terminal());
        assert!(view.render(&over, &hud(), vp).to_text().contains("GAME OVER"));
        assert!(!view.render(&sample(), &hud(), vp).to_text().contains("PAUSED"));
    }

    #[test]
    fn test_too_small_viewport() {
        let fb = GameView::default().render(&sample(), &hud(), Viewport::new(10, 4));
        assert!(fb.row_text(0).starts_with("Terminal t"));
        assert_eq!(count(&fb, HEAD_GLYPH), 0);
    }
}
