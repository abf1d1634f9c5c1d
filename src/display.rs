//! Terminal front-end. All terminal I/O lives here.
//!
//! The session draws in canvas pixels onto a [`TerminalSurface`], which
//! scales everything down into a character-cell buffer. `flush` then writes
//! that buffer (plus the end-of-game panel, if one is up) to the terminal.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use laser_defense::assets::{AssetProvider, TextureHandle};
use laser_defense::entities::Summary;
use laser_defense::error::AssetError;
use laser_defense::geometry::Rect;
use laser_defense::render::{self, Align, Presenter, RenderSurface, TextStyle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HERO: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_LASER: Color = Color::Red;
const C_LIFE: Color = Color::Red;
const C_PANEL: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn palette(color: render::Color) -> Color {
    match color {
        render::Color::Black => Color::Black,
        render::Color::Red => Color::Red,
        render::Color::Green => Color::Green,
        render::Color::White => Color::White,
    }
}

// ── Glyph atlas ───────────────────────────────────────────────────────────────

/// Character art standing in for a texture. Scaled to fit the drawn rect.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub art: &'static [&'static str],
    pub color: Color,
}

/// Known texture files, by file name.
fn builtin_sprite(file_name: &str) -> Option<Sprite> {
    let sprite = match file_name {
        "player.png" => Sprite {
            art: &["  ▲  ", " /█\\ ", "/███\\"],
            color: C_HERO,
        },
        "enemyShip.png" => Sprite {
            art: &["«▼▼▼»", " ╚═╝ "],
            color: C_ENEMY,
        },
        "laserRed.png" => Sprite {
            art: &["║"],
            color: C_LASER,
        },
        "life.png" => Sprite {
            art: &["♥"],
            color: C_LIFE,
        },
        _ => return None,
    };
    Some(sprite)
}

/// Asset provider backed by built-in character art.
#[derive(Debug, Default)]
pub struct GlyphAtlas {
    sprites: Vec<Sprite>,
    by_path: HashMap<String, TextureHandle>,
}

impl GlyphAtlas {
    pub fn sprite(&self, handle: TextureHandle) -> Option<&Sprite> {
        self.sprites.get(handle.0 as usize)
    }
}

impl AssetProvider for GlyphAtlas {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError> {
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(handle);
        }
        let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
        let sprite = builtin_sprite(file_name).ok_or_else(|| AssetError::Missing {
            path: path.to_string(),
        })?;
        let handle = TextureHandle(self.sprites.len() as u32);
        self.sprites.push(sprite);
        self.by_path.insert(path.to_string(), handle);
        log::debug!("texture {} -> {:?}", path, handle);
        Ok(handle)
    }
}

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// A canvas-sized render surface backed by a grid of terminal cells.
pub struct TerminalSurface {
    atlas: GlyphAtlas,
    canvas: (f32, f32),
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(atlas: GlyphAtlas, canvas: (f32, f32), cols: u16, rows: u16) -> Self {
        let mut surface = TerminalSurface {
            atlas,
            canvas,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        surface.resize(cols, rows);
        surface
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![BLANK; self.cols as usize * self.rows as usize];
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn cell_width(&self) -> f32 {
        self.canvas.0 / self.cols as f32
    }

    fn cell_height(&self) -> f32 {
        self.canvas.1 / self.rows as f32
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells[index] = Cell { ch, color };
    }
}

impl RenderSurface for TerminalSurface {
    fn size(&self) -> (f32, f32) {
        self.canvas
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn fill_background(&mut self, _color: render::Color) {
        // The terminal's own background is the play field.
        self.cells.fill(BLANK);
    }

    fn draw_texture(&mut self, texture: TextureHandle, rect: Rect) {
        let Some(sprite) = self.atlas.sprite(texture).cloned() else {
            return;
        };
        let (cw, ch) = (self.cell_width(), self.cell_height());
        let c0 = (rect.left / cw).floor() as i32;
        let r0 = (rect.top / ch).floor() as i32;
        let c1 = ((rect.right / cw).ceil() as i32).max(c0 + 1);
        let r1 = ((rect.bottom / ch).ceil() as i32).max(r0 + 1);

        // Nearest-neighbour scale of the art into the covered cells.
        let art_rows = sprite.art.len() as i32;
        for row in r0..r1 {
            let line: Vec<char> = sprite.art[((row - r0) * art_rows / (r1 - r0)) as usize]
                .chars()
                .collect();
            let art_cols = line.len() as i32;
            for col in c0..c1 {
                let glyph = line[((col - c0) * art_cols / (c1 - c0)) as usize];
                if glyph != ' ' {
                    self.put(col, row, glyph, sprite.color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let len = text.chars().count() as i32;
        let mut col = (x / self.cell_width()).floor() as i32;
        if style.align == Align::Center {
            col -= len / 2;
        }
        // `y` is a baseline; lift it to the middle of the glyphs.
        let row = ((y - style.size / 2.0) / self.cell_height()).floor() as i32;
        let color = palette(style.color);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    fn measure_text(&self, text: &str, _style: &TextStyle) -> f32 {
        text.chars().count() as f32 * self.cell_width()
    }
}

// ── End panel ─────────────────────────────────────────────────────────────────

/// Presentation layer: remembers the last session result until play resumes.
#[derive(Debug, Default)]
pub struct EndPanel {
    summary: Option<Summary>,
}

impl EndPanel {
    pub fn is_open(&self) -> bool {
        self.summary.is_some()
    }

    pub fn dismiss(&mut self) {
        self.summary = None;
    }
}

impl Presenter for EndPanel {
    fn show_end(&mut self, summary: &Summary) {
        self.summary = Some(*summary);
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Write the cell buffer, then the end panel over it if one is open.
pub fn flush<W: Write>(
    out: &mut W,
    surface: &TerminalSurface,
    panel: &EndPanel,
) -> std::io::Result<()> {
    let cols = surface.cols as usize;
    for (row, line) in surface.cells.chunks(cols).enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut current = None;
        for cell in line {
            if current != Some(cell.color) {
                out.queue(style::SetForegroundColor(cell.color))?;
                current = Some(cell.color);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    if let Some(summary) = &panel.summary {
        draw_end_panel(out, summary, surface.cols, surface.rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, surface.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_end_panel<W: Write>(
    out: &mut W,
    summary: &Summary,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let title = if summary.won { "║      VICTORY!      ║" } else { "║     GAME  OVER     ║" };
    let title_color = if summary.won { Color::Green } else { Color::Red };
    let lines: [(String, Color); 6] = [
        ("╔════════════════════╗".to_string(), title_color),
        (title.to_string(), title_color),
        ("╚════════════════════╝".to_string(), title_color),
        (format!("Total points: {:>6}", summary.score), C_PANEL),
        (format!("Lives left:   {:>6}", summary.lives), C_PANEL),
        ("ENTER - Play Again  Q - Quit".to_string(), C_HINT),
    ];

    let cx = width / 2;
    // Sit below the centred end message.
    let start_row = (height / 2 + 2).min(height.saturating_sub(lines.len() as u16));
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}
