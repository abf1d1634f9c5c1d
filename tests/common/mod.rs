//! Recording doubles shared by the integration tests.
#![allow(dead_code)]

use laser_defense::assets::{AssetProvider, TextureHandle, Textures};
use laser_defense::config::GameConfig;
use laser_defense::entities::Summary;
use laser_defense::error::AssetError;
use laser_defense::geometry::Rect;
use laser_defense::render::{Color, Presenter, RenderSurface, TextStyle};
use laser_defense::session::Session;

#[derive(Clone, Debug, PartialEq)]
pub enum Draw {
    Clear,
    Fill(Color),
    Texture(TextureHandle, Rect),
    Text { text: String, x: f32, y: f32, style: TextStyle },
}

/// Canvas double that records every draw call.
/// Text measures half its font size per character.
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<Draw>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        RecordingSurface { width: 1024.0, height: 768.0, calls: Vec::new() }
    }
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Draw::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn textures(&self) -> Vec<(TextureHandle, Rect)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Draw::Texture(handle, rect) => Some((*handle, *rect)),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.calls.push(Draw::Clear);
    }

    fn fill_background(&mut self, color: Color) {
        self.calls.push(Draw::Fill(color));
    }

    fn draw_texture(&mut self, texture: TextureHandle, rect: Rect) {
        self.calls.push(Draw::Texture(texture, rect));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.calls.push(Draw::Text { text: text.to_string(), x, y, style: *style });
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.size / 2.0
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub shown: Vec<Summary>,
}

impl Presenter for RecordingPresenter {
    fn show_end(&mut self, summary: &Summary) {
        self.shown.push(*summary);
    }
}

/// Provider that only knows the listed paths.
pub struct StubAssets {
    pub known: Vec<String>,
}

impl StubAssets {
    pub fn with_defaults() -> Self {
        let paths = GameConfig::default().assets;
        StubAssets { known: vec![paths.hero, paths.enemy, paths.laser, paths.life] }
    }
}

impl AssetProvider for StubAssets {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError> {
        self.known
            .iter()
            .position(|known| known == path)
            .map(|i| TextureHandle(i as u32))
            .ok_or_else(|| AssetError::Missing { path: path.to_string() })
    }
}

pub const HERO: TextureHandle = TextureHandle(0);
pub const ENEMY: TextureHandle = TextureHandle(1);
pub const LASER: TextureHandle = TextureHandle(2);
pub const LIFE: TextureHandle = TextureHandle(3);

pub fn textures() -> Textures {
    Textures { hero: HERO, enemy: ENEMY, laser: LASER, life: LIFE }
}

pub fn new_session() -> Session {
    Session::new(GameConfig::default(), textures())
}
