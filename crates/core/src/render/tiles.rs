//! Drawing a [`TileMap`] with one sprite per cell.

use glam::{Vec2, Vec3};

use super::sprite::SpriteRenderer;
use super::texture::TextureStore;
use crate::tilemap::TileMap;

/// Draws every occupied cell whose id has a texture in `store`.
///
/// Cells with an unknown id are skipped. Returns the number of sprites drawn.
pub fn draw_tile_map(
    renderer: &SpriteRenderer<'_>,
    store: &TextureStore,
    map: &TileMap,
    tile_size: f32,
) -> usize {
    let size = Vec2::splat(tile_size);
    let mut drawn = 0;
    for cell in map.cells(tile_size).filter(|c| !c.is_empty()) {
        match store.get(cell.id) {
            Some(texture) => {
                renderer.draw_sprite(texture, cell.center - size / 2.0, size, Vec3::ONE);
                drawn += 1;
            }
            None => log::debug!(
                "no texture for tile {} at ({}, {}), skipping",
                cell.id,
                cell.column,
                cell.row
            ),
        }
    }
    drawn
}
