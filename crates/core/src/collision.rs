//! Collision detection between a positioned shape and the board.

use crate::board::Board;
use crate::pieces::Shape;

/// Test whether `shape` placed with its top-left corner at (`x`, `y`) collides.
///
/// An occupied shape cell collides when it lands left or right of the board,
/// at or below the floor, or on an occupied board cell. Cells above the top
/// edge (negative y) only collide with the side walls.
pub fn collides(shape: &Shape, x: i32, y: i32, board: &Board) -> bool {
    let cols = i64::from(board.width());
    let rows = i64::from(board.height());

    // Widened so offsets near i32::MAX cannot overflow.
    shape.cells().iter().any(|&(dx, dy)| {
        let bx = i64::from(x) + i64::from(dx);
        let by = i64::from(y) + i64::from(dy);
        if bx < 0 || bx >= cols || by >= rows {
            return true;
        }
        by >= 0 && board.is_occupied(bx as i32, by as i32)
    })
}
