pub mod board;
pub mod shuffle;
pub mod tile;

pub use board::{images_equal, Board, BoardError};
pub use shuffle::{rand_unit, shuffle_order, splitmix32};
pub use tile::{Rotation, Tile};
