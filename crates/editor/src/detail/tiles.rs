use pageblocks_core::content::{Tile, TilesContent};
use pageblocks_core::siblings::Direction;
use pageblocks_core::{Content, VariantOptions};

use super::{Buffered, move_item, remove_item};

/// Link tiles form.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesForm {
    buffer: Buffered<TilesContent>,
    icon_tiles: bool,
}

impl TilesForm {
    /// Snapshots `content`.
    pub fn open(content: &Content, options: &VariantOptions) -> Self {
        Self {
            buffer: Buffered::open(content),
            icon_tiles: options.icon_tiles,
        }
    }

    /// Tiles show an icon rather than an image.
    pub fn uses_icons(&self) -> bool {
        self.icon_tiles
    }

    /// Tiles in display order.
    pub fn tiles(&self) -> &[Tile] {
        &self.buffer.current().tiles
    }

    /// Appends a tile and returns its index.
    pub fn add_tile(&mut self, title: impl Into<String>) -> usize {
        let tiles = &mut self.buffer.current_mut().tiles;
        tiles.push(Tile {
            title: title.into(),
            ..Tile::default()
        });
        tiles.len() - 1
    }

    /// Replaces tile `index`.
    pub fn update_tile(&mut self, index: usize, tile: Tile) -> bool {
        match self.buffer.current_mut().tiles.get_mut(index) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Removes tile `index`.
    pub fn remove_tile(&mut self, index: usize) -> bool {
        remove_item(&mut self.buffer.current_mut().tiles, index)
    }

    /// Moves tile `index` one step.
    pub fn move_tile(&mut self, index: usize, direction: Direction) -> bool {
        move_item(&mut self.buffer.current_mut().tiles, index, direction)
    }

    /// True when there is something to commit.
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Patch replacing the whole `tiles` array.
    pub fn patch(&self) -> Content {
        self.buffer.shallow_patch()
    }
}
