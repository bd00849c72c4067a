//! Pieces module - shape catalog and matrix rotation
//!
//! Every piece is a small boolean matrix (at most 4x4) stored inline, so shapes
//! are `Copy` values and rotation never allocates. Rotation is a pure function
//! that returns a new matrix; catalog entries are never mutated.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest side of any shape matrix.
pub const MAX_SHAPE_DIM: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Offset of a single occupied cell relative to the shape's top-left corner, as `(dx, dy)`
pub type CellOffset = (i32, i32);

/// Occupied offsets of a shape, in row-major order
pub type ShapeCells = ArrayVec<CellOffset, MAX_SHAPE_CELLS>;

/// One rotation state of a piece: an immutable row-major occupancy matrix
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major, stride `MAX_SHAPE_DIM`. Entries outside `width x height` stay false.
    filled: [bool; MAX_SHAPE_CELLS],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4. Shapes are
    /// static data, so a bad literal is a programming error.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_SHAPE_DIM,
            "shape must have 1..=4 rows"
        );
        let width = rows[0].len();
        assert!(
            width > 0 && width <= MAX_SHAPE_DIM,
            "shape must have 1..=4 columns"
        );

        let mut filled = [false; MAX_SHAPE_CELLS];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "shape rows must have equal length");
            for (j, &v) in row.iter().enumerate() {
                filled[i * MAX_SHAPE_DIM + j] = v != 0;
            }
        }

        Self {
            width: width as u8,
            height: rows.len() as u8,
            filled,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at matrix position (`row`, `col`) is occupied.
    /// Out-of-matrix positions are never occupied.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height as usize && col < self.width as usize && self.filled[row * MAX_SHAPE_DIM + col]
    }

    /// Occupied cells as `(dx, dy)` offsets, row by row.
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for i in 0..self.height as usize {
            for j in 0..self.width as usize {
                if self.filled[i * MAX_SHAPE_DIM + j] {
                    out.push((j as i32, i as i32));
                }
            }
        }
        out
    }

    /// Clockwise rotation of this shape. See [`rotate_clockwise`].
    pub fn rotated_cw(&self) -> Shape {
        rotate_clockwise(self)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows = f.debug_list();
        for i in 0..self.height as usize {
            let row: String = (0..self.width as usize)
                .map(|j| if self.is_filled(i, j) { '#' } else { '.' })
                .collect();
            rows.entry(&row);
        }
        rows.finish()
    }
}

/// Rotate a shape 90° clockwise: transpose, then reverse each row.
///
/// For a `h x w` input the result is `w x h` with
/// `rotated[i][j] = shape[h - 1 - j][i]`.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let h = shape.height as usize;
    let w = shape.width as usize;

    let mut filled = [false; MAX_SHAPE_CELLS];
    for i in 0..w {
        for j in 0..h {
            filled[i * MAX_SHAPE_DIM + j] = shape.filled[(h - 1 - j) * MAX_SHAPE_DIM + i];
        }
    }

    Shape {
        width: shape.height,
        height: shape.width,
        filled,
    }
}

/// Spawn-orientation shape for a piece kind
pub fn catalog_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::Z => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}
