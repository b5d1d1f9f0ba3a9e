use image::{imageops, RgbaImage};
use thiserror::Error;

use crate::shuffle::{shuffle_in_place, transform_trials};
use crate::tile::Tile;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("board needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("a {width}x{height} image cannot be split into {rows}x{cols} tiles")]
    TileTooSmall {
        rows: usize,
        cols: usize,
        width: u32,
        height: u32,
    },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Exact per-pixel equality. Images of differing dimensions are never equal.
pub fn images_equal(a: &RgbaImage, b: &RgbaImage) -> bool {
    a.dimensions() == b.dimensions() && a.as_raw() == b.as_raw()
}

/// The puzzle board: a rows x cols grid of tiles cut from one source image.
///
/// `tiles` is indexed by current position in row-major order, so the
/// occupant of cell (row, col) lives at `row * cols + col`. Swaps exchange
/// two slots and fix up both tiles' position fields, which keeps the
/// placement a permutation of the grid at all times.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    source: RgbaImage,
}

impl Board {
    /// Cuts the source into rows x cols tiles in the solved arrangement.
    ///
    /// Tile sizes are `floor(width / cols)` by `floor(height / rows)`;
    /// remainder pixels on the right and bottom edges are cropped away, not
    /// spread across tiles.
    pub fn partition(rows: usize, cols: usize, source: RgbaImage) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyGrid { rows, cols });
        }
        let tile_w = source.width() / cols as u32;
        let tile_h = source.height() / rows as u32;
        if tile_w == 0 || tile_h == 0 {
            return Err(BoardError::TileTooSmall {
                rows,
                cols,
                width: source.width(),
                height: source.height(),
            });
        }
        let mut tiles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let view = imageops::crop_imm(
                    &source,
                    col as u32 * tile_w,
                    row as u32 * tile_h,
                    tile_w,
                    tile_h,
                );
                tiles.push(Tile::new(row, col, view.to_image()));
            }
        }
        Ok(Self {
            rows,
            cols,
            tiles,
            source,
        })
    }

    /// Partition followed by the scramble, the normal way to start a game.
    pub fn new_shuffled(
        rows: usize,
        cols: usize,
        source: RgbaImage,
        seed: u32,
    ) -> Result<Self, BoardError> {
        let mut board = Self::partition(rows, cols, source)?;
        board.shuffle_and_transform(seed);
        Ok(board)
    }

    /// Applies a uniform random permutation to tile placement, then gives
    /// each tile its three independent transform coin flips.
    pub fn shuffle_and_transform(&mut self, seed: u32) {
        shuffle_in_place(seed, &mut self.tiles);
        for index in 0..self.tiles.len() {
            let row = index / self.cols;
            let col = index % self.cols;
            let tile = &mut self.tiles[index];
            tile.set_position(row, col);
            let (left, right, flip) = transform_trials(seed, index);
            if left {
                tile.rotate_left();
            }
            if right {
                tile.rotate_right();
            }
            if flip {
                tile.flip();
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn source(&self) -> &RgbaImage {
        &self.source
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// The tile currently occupying the cell.
    pub fn tile_at(&self, row: usize, col: usize) -> Result<&Tile, BoardError> {
        let index = self.index_of(row, col)?;
        Ok(&self.tiles[index])
    }

    pub fn tile_at_mut(&mut self, row: usize, col: usize) -> Result<&mut Tile, BoardError> {
        let index = self.index_of(row, col)?;
        Ok(&mut self.tiles[index])
    }

    /// Exchanges the occupants of the two cells. Swapping a cell with
    /// itself is a no-op.
    pub fn swap(
        &mut self,
        row1: usize,
        col1: usize,
        row2: usize,
        col2: usize,
    ) -> Result<(), BoardError> {
        let a = self.index_of(row1, col1)?;
        let b = self.index_of(row2, col2)?;
        if a == b {
            return Ok(());
        }
        self.tiles.swap(a, b);
        self.tiles[a].set_position(row1, col1);
        self.tiles[b].set_position(row2, col2);
        Ok(())
    }

    /// Placement only: every tile sits on its home cell, rotation and flip
    /// ignored.
    pub fn is_structurally_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_at_home)
    }

    /// The authoritative solved predicate: placement is correct and every
    /// tile's rendered pixels match its untransformed reference exactly.
    pub fn is_fully_solved(&self) -> bool {
        self.is_structurally_solved()
            && self
                .tiles
                .iter()
                .all(|tile| images_equal(&tile.rendered_image(), tile.reference_image()))
    }
}
