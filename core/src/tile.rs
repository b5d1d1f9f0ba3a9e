use image::{imageops, RgbaImage};

/// Quarter-turn rotation state, clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// One step counterclockwise (minus 90 degrees, mod 360).
    pub fn turned_left(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R270,
            Rotation::R90 => Rotation::R0,
            Rotation::R180 => Rotation::R90,
            Rotation::R270 => Rotation::R180,
        }
    }

    /// One step clockwise (plus 90 degrees, mod 360).
    pub fn turned_right(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

/// One grid cell of the puzzle: its correct coordinate, where it currently
/// sits, and the transform the player has applied to it.
///
/// `pixels` is extracted once when the board is partitioned and never
/// mutated afterward; only `position`, `rotation` and `flipped` change.
#[derive(Clone, Debug)]
pub struct Tile {
    home: (usize, usize),
    position: (usize, usize),
    rotation: Rotation,
    flipped: bool,
    pixels: RgbaImage,
}

impl Tile {
    pub fn new(home_row: usize, home_col: usize, pixels: RgbaImage) -> Self {
        Self {
            home: (home_row, home_col),
            position: (home_row, home_col),
            rotation: Rotation::R0,
            flipped: false,
            pixels,
        }
    }

    /// Correct (row, col) in the solved arrangement.
    pub fn home(&self) -> (usize, usize) {
        self.home
    }

    /// Current (row, col) on the board. Changed only by board swaps.
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub(crate) fn set_position(&mut self, row: usize, col: usize) {
        self.position = (row, col);
    }

    pub fn rotate_left(&mut self) {
        self.rotation = self.rotation.turned_left();
    }

    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.turned_right();
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_at_home(&self) -> bool {
        self.position == self.home
    }

    /// The tile as the player sees it: the stored pixels with the current
    /// transform applied. Pure; the stored pixels are untouched.
    ///
    /// The transform chain is translate-to-center, rotate, mirror
    /// horizontally when flipped, translate back. Composed onto source
    /// pixels that means the mirror happens first, then the rotation.
    pub fn rendered_image(&self) -> RgbaImage {
        let base = if self.flipped {
            imageops::flip_horizontal(&self.pixels)
        } else {
            self.pixels.clone()
        };
        match self.rotation {
            Rotation::R0 => base,
            Rotation::R90 => imageops::rotate90(&base),
            Rotation::R180 => imageops::rotate180(&base),
            Rotation::R270 => imageops::rotate270(&base),
        }
    }

    /// The untransformed pixels, used as the yardstick for a true solve.
    pub fn reference_image(&self) -> &RgbaImage {
        &self.pixels
    }
}
