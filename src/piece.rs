//! Active falling piece logic
//!
//! A piece is its shape matrix plus an anchor; rotation transforms the
//! matrix in place and a short horizontal kick search resolves collisions.

use crate::board::Board;
use crate::tetromino::{Shape, TetrominoType};

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Horizontal offsets tried after a rotation, in priority order.
/// Deliberately minimal; this is not a full SRS kick table.
const KICK_OFFSETS: [i32; 5] = [0, 1, -1, 2, -2];

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Current shape matrix (rotates with the piece)
    pub shape: Shape,
    /// Anchor position of the matrix's top-left corner on the board.
    /// y may be negative while the piece pokes above the visible rows.
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece of the given type at its spawn anchor
    pub fn spawn(kind: TetrominoType) -> Self {
        let (x, y) = kind.spawn_anchor();
        Self {
            kind,
            shape: kind.shape(),
            x,
            y,
        }
    }

    /// The same piece moved back to its type's spawn anchor.
    ///
    /// The current shape is kept, so a piece coming out of hold re-enters
    /// play with whatever rotation it had when it was set aside.
    pub fn at_spawn_anchor(&self) -> Self {
        let (x, y) = self.kind.spawn_anchor();
        Self {
            x,
            y,
            ..self.clone()
        }
    }

    /// Absolute board coordinates of the occupied shape cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter().enumerate().filter_map(move |(dx, &cell)| {
                (cell != 0).then_some((self.x + dx as i32, self.y + dy as i32))
            })
        })
    }

    /// The same piece shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// The same piece rotated a quarter turn, anchor unchanged.
    ///
    /// Clockwise maps matrix cell (y, x) to (x, N-1-y), counter-clockwise
    /// to (N-1-x, y). O pieces are fixed points.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        if self.kind == TetrominoType::O {
            return self.clone();
        }

        let n = self.shape.len();
        let mut rotated = vec![vec![0u8; n]; n];
        for (y, row) in self.shape.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                match direction {
                    RotationDirection::Clockwise => rotated[x][n - 1 - y] = cell,
                    RotationDirection::CounterClockwise => rotated[n - 1 - x][y] = cell,
                }
            }
        }

        Self {
            shape: rotated,
            ..self.clone()
        }
    }

    /// Rotate and resolve collisions with the kick offset search.
    ///
    /// Offsets are tried in fixed priority order; the first placement the
    /// board accepts wins. None means the rotation is rejected and the
    /// caller keeps the piece as it was.
    pub fn rotate_with_kicks(
        &self,
        direction: RotationDirection,
        board: &Board,
    ) -> Option<Piece> {
        let rotated = self.rotated(direction);
        KICK_OFFSETS.iter().find_map(|&dx| {
            let candidate = rotated.translated(dx, 0);
            board.can_place(&candidate).then_some(candidate)
        })
    }

    /// The piece advanced straight down to its last valid row.
    ///
    /// This is the landing projection shared by the ghost preview and hard
    /// drop; purely advisory until a lock merges it.
    pub fn dropped(&self, board: &Board) -> Piece {
        let mut landed = self.clone();
        loop {
            let below = landed.translated(0, 1);
            if board.can_place(&below) {
                landed = below;
            } else {
                return landed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::spawn(TetrominoType::O);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 0), (5, 0), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_cw_then_ccw_restores_shape() {
        for kind in TetrominoType::all() {
            let piece = Piece::spawn(kind);
            let there_and_back = piece
                .rotated(RotationDirection::Clockwise)
                .rotated(RotationDirection::CounterClockwise);
            assert_eq!(piece.shape, there_and_back.shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_four_quarter_turns_restore_shape() {
        for kind in TetrominoType::all() {
            let piece = Piece::spawn(kind);
            let mut turned = piece.clone();
            for _ in 0..4 {
                turned = turned.rotated(RotationDirection::Clockwise);
            }
            assert_eq!(piece.shape, turned.shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_piece_is_rotation_fixed_point() {
        let piece = Piece::spawn(TetrominoType::O);
        assert_eq!(piece, piece.rotated(RotationDirection::Clockwise));
        assert_eq!(piece, piece.rotated(RotationDirection::CounterClockwise));
    }

    #[test]
    fn test_rotation_keeps_anchor() {
        let piece = Piece::spawn(TetrominoType::T).translated(2, 5);
        let rotated = piece.rotated(RotationDirection::Clockwise);
        assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
    }

    #[test]
    fn test_kick_search_shifts_off_the_wall() {
        let board = Board::new();
        // A T jammed against the left wall; the in-place rotation pokes out
        // at column -1 and the +1 kick resolves it
        let piece = Piece::spawn(TetrominoType::T).translated(-4, 5);
        let kicked = piece
            .rotate_with_kicks(RotationDirection::CounterClockwise, &board)
            .expect("kick should resolve");
        assert_eq!(kicked.x, piece.x + 1);
    }

    #[test]
    fn test_kick_search_prefers_in_place() {
        let board = Board::new();
        let piece = Piece::spawn(TetrominoType::T).translated(0, 5);
        let rotated = piece
            .rotate_with_kicks(RotationDirection::Clockwise, &board)
            .expect("open board rotation");
        assert_eq!(rotated.x, piece.x);
    }

    #[test]
    fn test_kick_search_can_reject() {
        let mut board = Board::new();
        // Wall off every column but 0 in the bottom four rows
        for y in 16..20 {
            for x in 1..10 {
                board.set(x, y, Cell::Locked(TetrominoType::L));
            }
        }
        // A vertical I standing in the remaining column
        let vertical = Piece::spawn(TetrominoType::I)
            .rotated(RotationDirection::Clockwise)
            .translated(-5, 17);
        assert!(board.can_place(&vertical));

        // No horizontal placement exists within the kick offsets
        assert!(vertical
            .rotate_with_kicks(RotationDirection::Clockwise, &board)
            .is_none());
    }

    #[test]
    fn test_dropped_reaches_floor() {
        let board = Board::new();
        let piece = Piece::spawn(TetrominoType::I);
        let landed = piece.dropped(&board);
        // The I bar's occupied row comes to rest on the bottom row
        assert_eq!(landed.y, 18);
        assert!(landed.cells().all(|(_, y)| y == 19));
    }

    #[test]
    fn test_dropped_rests_on_stack() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 19, Cell::Locked(TetrominoType::J));
        }
        let landed = Piece::spawn(TetrominoType::O).dropped(&board);
        assert!(landed.cells().all(|(_, y)| y < 19));
        assert!(landed.cells().any(|(_, y)| y == 18));
    }

    #[test]
    fn test_spawn_anchor_reset_keeps_shape() {
        let rotated = Piece::spawn(TetrominoType::L)
            .rotated(RotationDirection::Clockwise)
            .translated(3, 7);
        let respawned = rotated.at_spawn_anchor();
        assert_eq!(respawned.shape, rotated.shape);
        assert_eq!(
            (respawned.x, respawned.y),
            TetrominoType::L.spawn_anchor()
        );
    }
}
