//! Drawing side of the game.
//!
//! The core never talks to a screen directly: it issues draw calls against a
//! [`RenderSurface`] sized like the canvas, and hands the final numbers to a
//! [`Presenter`] when a session ends.

use crate::assets::TextureHandle;
use crate::entities::{Entity, Summary};
use crate::geometry::Rect;

// ── Collaborator traits ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge of the text.
    Left,
    /// `x` is the horizontal centre of the text.
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

/// Canvas-like target for draw commands. Coordinates are canvas pixels.
pub trait RenderSurface {
    /// Canvas width and height.
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn fill_background(&mut self, color: Color);
    fn draw_texture(&mut self, texture: TextureHandle, rect: Rect);
    /// `y` is the text baseline.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
    /// Rendered width of `text` in pixels.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32;
}

/// End-of-session panel. Called exactly once per finished session.
pub trait Presenter {
    fn show_end(&mut self, summary: &Summary);
}

// ── Layout constants ──────────────────────────────────────────────────────────

pub const FONT_SIZE: f32 = 30.0;
pub const LINE_HEIGHT: f32 = 30.0;
/// Horizontal room left around a wrapped end message.
pub const MESSAGE_MARGIN: f32 = 40.0;
pub const LIFE_ICON_WIDTH: f32 = 33.0;
pub const LIFE_ICON_HEIGHT: f32 = 26.0;
const LIFE_ICON_SPACING: f32 = 45.0;
/// Distance of the life row's anchor from the right edge.
const LIFE_ROW_INSET: f32 = 180.0;

pub const WIN_MESSAGE: &str = "Victory! Press [Enter] to play again";
pub const LOSS_MESSAGE: &str = "Ouch, the enemy ships have defeated you! Press [Enter] to play again";

pub fn end_message(won: bool) -> (&'static str, Color) {
    if won {
        (WIN_MESSAGE, Color::Green)
    } else {
        (LOSS_MESSAGE, Color::Red)
    }
}

// ── Frame pieces ──────────────────────────────────────────────────────────────

/// Wipe the surface to the black play-field background.
pub fn clear_screen<S: RenderSurface + ?Sized>(surface: &mut S) {
    surface.clear();
    surface.fill_background(Color::Black);
}

/// "Points: N" in the top-left corner.
pub fn draw_points<S: RenderSurface + ?Sized>(surface: &mut S, score: u32) {
    let style = TextStyle {
        size: FONT_SIZE,
        color: Color::Red,
        align: Align::Left,
    };
    surface.draw_text(&format!("Points: {}", score), 10.0, 30.0, &style);
}

/// One life icon per remaining life, top-right.
pub fn draw_life<S: RenderSurface + ?Sized>(surface: &mut S, lives: u32, icon: TextureHandle) {
    let (width, _) = surface.size();
    let start = width - LIFE_ROW_INSET;
    for i in 0..lives {
        let x = start + LIFE_ICON_SPACING * (i + 1) as f32;
        let rect = Rect::from_bounds(x, 10.0, LIFE_ICON_WIDTH, LIFE_ICON_HEIGHT);
        surface.draw_texture(icon, rect);
    }
}

/// Draw every entity still alive, each at its bounding rectangle.
pub fn draw_game_objects<S: RenderSurface + ?Sized>(surface: &mut S, entities: &[Entity]) {
    for entity in entities.iter().filter(|e| e.alive) {
        surface.draw_texture(entity.texture, entity.rect());
    }
}

// ── End message ───────────────────────────────────────────────────────────────

/// Greedy word wrap: a word joins the current line while the joined line
/// measures strictly narrower than `max_width`.
pub fn wrap_text<S: RenderSurface + ?Sized>(
    surface: &S,
    message: &str,
    style: &TextStyle,
    max_width: f32,
) -> Vec<String> {
    let mut words = message.split(' ');
    let mut current = words.next().unwrap_or_default().to_string();
    let mut lines = Vec::new();

    for word in words {
        let candidate = format!("{} {}", current, word);
        if surface.measure_text(&candidate, style) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Clear the screen and draw `message` wrapped and centred on the canvas.
pub fn display_message<S: RenderSurface + ?Sized>(surface: &mut S, message: &str, color: Color) {
    let style = TextStyle {
        size: FONT_SIZE,
        color,
        align: Align::Center,
    };
    let (width, height) = surface.size();
    let lines = wrap_text(surface, message, &style, width - MESSAGE_MARGIN);

    clear_screen(surface);
    let mut y = (height - lines.len() as f32 * LINE_HEIGHT) / 2.0;
    for line in &lines {
        surface.draw_text(line, width / 2.0, y, &style);
        y += LINE_HEIGHT;
    }
}
