//! Texture handles and the provider that resolves them.

use crate::config::AssetPaths;
use crate::error::AssetError;

/// Opaque reference to a texture owned by the asset provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Resolves asset paths to textures the render surface can draw.
pub trait AssetProvider {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError>;
}

/// Every texture a session draws. A session cannot start without all four.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Textures {
    pub hero: TextureHandle,
    pub enemy: TextureHandle,
    pub laser: TextureHandle,
    pub life: TextureHandle,
}

impl Textures {
    /// Resolve every texture up front, failing on the first missing one.
    pub fn load<P: AssetProvider + ?Sized>(
        provider: &mut P,
        paths: &AssetPaths,
    ) -> Result<Self, AssetError> {
        let textures = Textures {
            hero: provider.load_texture(&paths.hero)?,
            enemy: provider.load_texture(&paths.enemy)?,
            laser: provider.load_texture(&paths.laser)?,
            life: provider.load_texture(&paths.life)?,
        };
        log::debug!("textures resolved: {:?}", textures);
        Ok(textures)
    }
}
