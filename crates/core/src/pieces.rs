//! Piece catalog - shape matrices and the rotation transform
//!
//! Every kind has a square matrix at spawn orientation: 2x2 for O, 4x4 for I
//! and 3x3 for the rest. Occupied cells hold the kind id (1-7), empty cells 0.
//! Rotation works on the matrix in place: transpose, then reverse each row
//! (clockwise) or reverse the row order (counter-clockwise).

use crate::types::{PieceKind, RotateDir};

/// Largest matrix side (the I piece).
pub const MAX_SHAPE: usize = 4;

/// A square shape matrix stored in a fixed 4x4 buffer.
///
/// Only the top-left `size` x `size` region is meaningful; the rest stays 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[u8; MAX_SHAPE]; MAX_SHAPE],
}

const I_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [0, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 0, 0],
];

const L_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [0, 2, 0, 0],
    [0, 2, 0, 0],
    [0, 2, 2, 0],
    [0, 0, 0, 0],
];

const J_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [0, 3, 0, 0],
    [0, 3, 0, 0],
    [3, 3, 0, 0],
    [0, 0, 0, 0],
];

const O_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [4, 4, 0, 0],
    [4, 4, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
];

const Z_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [5, 5, 0, 0],
    [0, 5, 5, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
];

const S_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [0, 6, 6, 0],
    [6, 6, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
];

const T_MATRIX: [[u8; MAX_SHAPE]; MAX_SHAPE] = [
    [0, 7, 0, 0],
    [7, 7, 7, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
];

impl Shape {
    /// Spawn-orientation matrix for a kind.
    pub fn spawn(kind: PieceKind) -> Self {
        let (size, cells) = match kind {
            PieceKind::I => (4, I_MATRIX),
            PieceKind::L => (3, L_MATRIX),
            PieceKind::J => (3, J_MATRIX),
            PieceKind::O => (2, O_MATRIX),
            PieceKind::Z => (3, Z_MATRIX),
            PieceKind::S => (3, S_MATRIX),
            PieceKind::T => (3, T_MATRIX),
        };
        Self { size, cells }
    }

    /// Side length of the matrix (also its width).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell value at local (col, row); 0 outside the matrix.
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col >= self.size as usize || row >= self.size as usize {
            return 0;
        }
        self.cells[row][col]
    }

    /// The meaningful rows, each trimmed to `size` columns.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let n = self.size as usize;
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Local (col, row) offsets of the occupied cells, row-major.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.rows().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(col, _)| (col as i8, row as i8))
        })
    }

    /// Rotate 90° in place.
    pub fn rotate(&mut self, dir: RotateDir) {
        let n = self.size as usize;

        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[x][y];
                self.cells[x][y] = self.cells[y][x];
                self.cells[y][x] = tmp;
            }
        }

        match dir {
            RotateDir::Cw => {
                for row in &mut self.cells[..n] {
                    row[..n].reverse();
                }
            }
            RotateDir::Ccw => self.cells[..n].reverse(),
        }
    }

    /// Rotated copy.
    pub fn rotated(mut self, dir: RotateDir) -> Self {
        self.rotate(dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(shape: &Shape) -> Vec<Vec<u8>> {
        shape.rows().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_matrix_sizes() {
        assert_eq!(Shape::spawn(PieceKind::O).size(), 2);
        assert_eq!(Shape::spawn(PieceKind::I).size(), 4);
        for kind in [PieceKind::L, PieceKind::J, PieceKind::Z, PieceKind::S, PieceKind::T] {
            assert_eq!(Shape::spawn(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_kind_has_four_minos_with_its_id() {
        for kind in PieceKind::ALL {
            let shape = Shape::spawn(kind);
            assert_eq!(shape.minos().count(), 4, "{:?}", kind);
            for (x, y) in shape.minos() {
                assert_eq!(shape.get(x as usize, y as usize), kind.id());
            }
        }
    }

    #[test]
    fn test_t_rotates_clockwise_to_point_right() {
        let t = Shape::spawn(PieceKind::T).rotated(RotateDir::Cw);
        assert_eq!(grid(&t), vec![vec![0, 7, 0], vec![0, 7, 7], vec![0, 7, 0]]);
    }

    #[test]
    fn test_t_rotates_counter_clockwise_to_point_left() {
        let t = Shape::spawn(PieceKind::T).rotated(RotateDir::Ccw);
        assert_eq!(grid(&t), vec![vec![0, 7, 0], vec![7, 7, 0], vec![0, 7, 0]]);
    }

    #[test]
    fn test_i_rotates_to_horizontal() {
        let i = Shape::spawn(PieceKind::I).rotated(RotateDir::Cw);
        assert_eq!(
            grid(&i),
            vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = Shape::spawn(PieceKind::O);
        assert_eq!(o.rotated(RotateDir::Cw), o);
        assert_eq!(o.rotated(RotateDir::Ccw), o);
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        for kind in PieceKind::ALL {
            let shape = Shape::spawn(kind);
            assert_eq!(
                shape.rotated(RotateDir::Cw).rotated(RotateDir::Ccw),
                shape,
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_padding_stays_empty_after_rotation() {
        let mut s = Shape::spawn(PieceKind::S);
        for _ in 0..3 {
            s.rotate(RotateDir::Cw);
            assert_eq!(s.get(3, 0), 0);
            assert_eq!(s.cells[3], [0; MAX_SHAPE]);
            assert!(s.cells.iter().all(|row| row[3] == 0));
        }
    }
}
