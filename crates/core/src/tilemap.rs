//! Tile grids produced by an external map loader.
//!
//! The renderer only needs the finished grid: per-tile image metadata and a
//! flat row-major list of tile ids. Id `0` marks an empty cell.
//!
//! Cells are laid out in normalized device units starting at the top-left
//! corner `(-1, 1)`, one `tile_size` apart, rows growing downwards.

use glam::Vec2;

use crate::batch::Batch;
use crate::error::RenderError;

/// Image metadata for one tile id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub image: String,
}

/// One cell of the grid with its world-space center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell {
    pub column: usize,
    pub row: usize,
    pub id: u32,
    pub center: Vec2,
}

impl TileCell {
    pub fn is_empty(&self) -> bool {
        self.id == TileMap::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tiles: Vec<Tile>,
    map: Vec<u32>,
    columns: usize,
}

impl TileMap {
    /// Tile id of a cell with nothing in it.
    pub const EMPTY: u32 = 0;

    /// Builds a grid of `map.len() / columns` rows.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidTileMap` if `columns` is zero or does not
    /// divide the cell count.
    pub fn new(tiles: Vec<Tile>, map: Vec<u32>, columns: usize) -> Result<Self, RenderError> {
        if columns == 0 || map.len() % columns != 0 {
            return Err(RenderError::InvalidTileMap(format!(
                "{} cells in {columns} columns",
                map.len()
            )));
        }
        Ok(Self {
            tiles,
            map,
            columns,
        })
    }

    /// A `columns x rows` grid filled with one id.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidTileMap` if `columns` is zero or the
    /// grid is too large to allocate.
    pub fn filled(columns: usize, rows: usize, id: u32) -> Result<Self, RenderError> {
        let too_large =
            || RenderError::InvalidTileMap(format!("{columns}x{rows} grid is too large"));
        let cells = columns.checked_mul(rows).ok_or_else(too_large)?;
        let mut map = Vec::new();
        map.try_reserve_exact(cells).map_err(|_| too_large())?;
        map.resize(cells, id);
        Self::new(Vec::new(), map, columns)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.map.len() / self.columns
    }

    pub fn ids(&self) -> &[u32] {
        &self.map
    }

    /// Number of cells holding a tile.
    pub fn occupied(&self) -> usize {
        self.map.iter().filter(|&&id| id != Self::EMPTY).count()
    }

    /// All cells in row-major order, empty ones included.
    pub fn cells(&self, tile_size: f32) -> impl Iterator<Item = TileCell> + '_ {
        self.map.iter().enumerate().map(move |(n, &id)| {
            let column = n % self.columns;
            let row = n / self.columns;
            TileCell {
                column,
                row,
                id,
                center: cell_center(column, row, tile_size),
            }
        })
    }

    /// Pushes one textured quad per occupied cell; returns the quad count.
    pub fn push_into(&self, batch: &mut Batch, tile_size: f32, z: f32) -> usize {
        self.push_matching(batch, tile_size, z, |_| true)
    }

    /// Pushes quads only for cells holding `id`, for drawing one texture at
    /// a time.
    pub fn push_id_into(&self, batch: &mut Batch, id: u32, tile_size: f32, z: f32) -> usize {
        self.push_matching(batch, tile_size, z, |cell| cell == id)
    }

    fn push_matching(
        &self,
        batch: &mut Batch,
        tile_size: f32,
        z: f32,
        keep: impl Fn(u32) -> bool,
    ) -> usize {
        let mut pushed = 0;
        for cell in self.cells(tile_size) {
            if cell.is_empty() || !keep(cell.id) {
                continue;
            }
            batch.push_textured_quad(cell.center, tile_size, tile_size, z);
            pushed += 1;
        }
        pushed
    }
}

fn cell_center(column: usize, row: usize, tile_size: f32) -> Vec2 {
    let x = column as f32 * tile_size - 1.0 + tile_size / 2.0;
    let y = -(row as f32 * tile_size - 1.0 + tile_size / 2.0);
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass() -> Tile {
        Tile {
            id: 1,
            width: 32,
            height: 32,
            image: "grass.png".into(),
        }
    }

    #[test]
    fn new_rejects_ragged_grid() {
        let result = TileMap::new(Vec::new(), vec![1; 7], 3);
        assert!(matches!(result, Err(RenderError::InvalidTileMap(_))));
    }

    #[test]
    fn new_rejects_zero_columns() {
        let result = TileMap::new(Vec::new(), Vec::new(), 0);
        assert!(matches!(result, Err(RenderError::InvalidTileMap(_))));
    }

    #[test]
    fn filled_rejects_overflowing_cell_count() {
        let result = TileMap::filled(usize::MAX, 2, 1);
        match result {
            Err(RenderError::InvalidTileMap(msg)) => assert!(msg.contains("too large"), "{msg}"),
            other => panic!("expected InvalidTileMap, got {other:?}"),
        }
    }

    #[test]
    fn filled_rejects_unallocatable_grid() {
        let result = TileMap::filled(usize::MAX / 2, 1, 1);
        assert!(matches!(result, Err(RenderError::InvalidTileMap(_))));
    }

    #[test]
    fn rows_follow_from_columns() {
        let map = TileMap::filled(4, 3, 1).unwrap();
        assert_eq!(map.columns(), 4);
        assert_eq!(map.rows(), 3);
        assert_eq!(map.ids().len(), 12);
    }

    #[test]
    fn tile_lookup_by_id() {
        let map = TileMap::new(vec![grass()], vec![1, 0], 2).unwrap();
        assert_eq!(map.tile(1).map(|t| t.image.as_str()), Some("grass.png"));
        assert!(map.tile(2).is_none());
    }

    #[test]
    fn first_cell_sits_in_top_left_corner() {
        let map = TileMap::filled(20, 20, 1).unwrap();
        let first = map.cells(0.1).next().unwrap();
        assert!(first.center.abs_diff_eq(Vec2::new(-0.95, 0.95), 1e-6));
    }

    #[test]
    fn cells_are_row_major() {
        let map = TileMap::new(Vec::new(), vec![1, 2, 3, 4, 5, 6], 3).unwrap();
        let cells: Vec<TileCell> = map.cells(0.5).collect();
        assert_eq!(cells[4].column, 1);
        assert_eq!(cells[4].row, 1);
        assert_eq!(cells[4].id, 5);
        assert!(cells[1].center.x > cells[0].center.x);
        assert!(cells[3].center.y < cells[0].center.y);
    }

    #[test]
    fn push_into_skips_empty_cells() {
        let map = TileMap::new(vec![grass()], vec![1, 0, 1, 1], 2).unwrap();
        let mut batch = Batch::new();
        let quads = map.push_into(&mut batch, 0.2, 0.0);
        assert_eq!(quads, 3);
        assert_eq!(map.occupied(), 3);
        assert_eq!(batch.len(), 6 * 3);
    }

    #[test]
    fn push_id_into_filters_by_id() {
        let map = TileMap::new(Vec::new(), vec![1, 2, 2, 0], 2).unwrap();
        let mut batch = Batch::new();
        assert_eq!(map.push_id_into(&mut batch, 2, 0.2, 0.0), 2);
        assert_eq!(batch.len(), 12);
        assert_eq!(map.push_id_into(&mut batch, 9, 0.2, 0.0), 0);
        assert_eq!(batch.len(), 12);
    }

    #[test]
    fn push_into_carries_z() {
        let map = TileMap::filled(2, 2, 3).unwrap();
        let mut batch = Batch::new();
        map.push_into(&mut batch, 0.5, -0.25);
        assert!(batch.vertices().iter().all(|v| v.position[2] == -0.25));
    }
}
