//! Tetromino definitions and shapes
//!
//! Shapes are square matrices in spawn orientation, with occupied cells
//! holding the piece's own type id. Rotation is computed geometrically on
//! the matrix (see the piece module), so only the spawn orientation is
//! stored here.

use crate::board::BOARD_WIDTH;
use ratatui::style::Color;

/// A piece shape matrix. Always square: 2x2 for O, 4x4 for I, 3x3 otherwise.
pub type Shape = Vec<Vec<u8>>;

/// The 7 tetromino types with their classic ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // 1 - Cyan, long bar
    J, // 2 - Blue
    L, // 3 - Orange
    O, // 4 - Yellow, square
    S, // 5 - Green
    T, // 6 - Purple
    Z, // 7 - Red
}

impl TetrominoType {
    /// Numeric id used in grids and snapshots (1-7)
    pub fn id(&self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::J => 2,
            TetrominoType::L => 3,
            TetrominoType::O => 4,
            TetrominoType::S => 5,
            TetrominoType::T => 6,
            TetrominoType::Z => 7,
        }
    }

    /// Look up a type by id.
    ///
    /// Ids only ever come from the randomizer or the catalog itself, so an
    /// out-of-range value is a bug upstream; substitute T rather than fail.
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => TetrominoType::I,
            2 => TetrominoType::J,
            3 => TetrominoType::L,
            4 => TetrominoType::O,
            5 => TetrominoType::S,
            6 => TetrominoType::T,
            7 => TetrominoType::Z,
            _ => {
                tracing::warn!("invalid tetromino id {}, substituting T", id);
                TetrominoType::T
            }
        }
    }

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
            TetrominoType::O => Color::Yellow,
            TetrominoType::S => Color::Green,
            TetrominoType::T => Color::Magenta,
            TetrominoType::Z => Color::Red,
        }
    }

    /// Get all tetromino types for bag randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::Z,
        ]
    }

    /// Shape matrix in spawn orientation
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            TetrominoType::J => vec![
                vec![2, 0, 0],
                vec![2, 2, 2],
                vec![0, 0, 0],
            ],
            TetrominoType::L => vec![
                vec![0, 0, 3],
                vec![3, 3, 3],
                vec![0, 0, 0],
            ],
            TetrominoType::O => vec![
                vec![4, 4],
                vec![4, 4],
            ],
            TetrominoType::S => vec![
                vec![0, 5, 5],
                vec![5, 5, 0],
                vec![0, 0, 0],
            ],
            TetrominoType::T => vec![
                vec![0, 6, 0],
                vec![6, 6, 6],
                vec![0, 0, 0],
            ],
            TetrominoType::Z => vec![
                vec![7, 7, 0],
                vec![0, 7, 7],
                vec![0, 0, 0],
            ],
        }
    }

    /// Spawn anchor (x, y) for this type.
    ///
    /// The occupied bounding box is centered horizontally on the board and
    /// the anchor is lifted so the topmost occupied row lands on board row 0.
    /// Shapes with a leading empty row (the I piece) get a negative y,
    /// spawning partially above the visible board.
    pub fn spawn_anchor(&self) -> (i32, i32) {
        let shape = self.shape();

        let mut min_x = shape.len() as i32;
        let mut max_x = -1i32;
        let mut min_y = shape.len() as i32;
        for (y, row) in shape.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    min_x = min_x.min(x as i32);
                    max_x = max_x.max(x as i32);
                    min_y = min_y.min(y as i32);
                }
            }
        }

        let width = max_x - min_x + 1;
        let x = (BOARD_WIDTH as i32 - width) / 2 - min_x;
        (x, -min_y)
    }
}
