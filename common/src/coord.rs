use std::fmt;

use crate::error::SolitaireError;

/// A hole number on the board, counted row by row from the apex starting at 1.
///
/// ```text
///         1
///       2   3
///     4   5   6
///   7   8   9  10
/// 11  12  13  14  15
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct Position(pub usize);

impl Position {
    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based cell index. Position 0 wraps to `usize::MAX`, which is out
    /// of range for every board.
    pub(crate) fn index(self) -> usize {
        self.0.wrapping_sub(1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-based row and column of a hole. Row `r` has columns `0..=r`.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

/// Shape of a triangular board with `side` rows, where row `r` holds `r + 1`
/// holes.
///
/// Invariant: `side >= 1`
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct Triangle {
    side: usize,
}

impl Triangle {
    pub fn new(side: usize) -> Result<Self, SolitaireError> {
        if side == 0 {
            return Err(SolitaireError::InvalidShape {
                message: "a triangle needs at least one row".into(),
            });
        }
        if hole_count(side).is_none() {
            return Err(SolitaireError::InvalidShape {
                message: format!("{side} rows hold more holes than can be numbered"),
            });
        }
        Ok(Triangle { side })
    }

    /// The classic 15 hole board.
    pub const fn standard() -> Self {
        Triangle { side: 5 }
    }

    /// Find the triangle that has exactly `nr_holes` holes, if there is one.
    pub fn from_nr_holes(nr_holes: usize) -> Option<Self> {
        (1..)
            .map_while(|side| Some((side, hole_count(side)?)))
            .take_while(|&(_, count)| count <= nr_holes)
            .find(|&(_, count)| count == nr_holes)
            .map(|(side, _)| Triangle { side })
    }

    pub fn side(self) -> usize {
        self.side
    }

    pub fn nr_holes(self) -> usize {
        self.side * (self.side + 1) / 2
    }

    pub fn row_len(self, row: usize) -> usize {
        row + 1
    }

    /// Zero-based index of the first hole in `row`.
    pub(crate) fn row_start(self, row: usize) -> usize {
        row * (row + 1) / 2
    }

    pub fn contains(self, coord: Coord) -> bool {
        coord.row < self.side && coord.col < self.row_len(coord.row)
    }

    pub fn position_to_coord(self, pos: Position) -> Result<Coord, SolitaireError> {
        let nr_holes = self.nr_holes();
        if pos.0 < 1 || pos.0 > nr_holes {
            return Err(SolitaireError::OutOfRange {
                position: pos.0,
                nr_holes,
            });
        }

        let idx = pos.index();
        let mut row = 0;
        while self.row_start(row + 1) <= idx {
            row += 1;
        }

        Ok(Coord {
            row,
            col: idx - self.row_start(row),
        })
    }

    pub fn coord_to_position(self, coord: Coord) -> Result<Position, SolitaireError> {
        if !self.contains(coord) {
            return Err(SolitaireError::CoordOutOfRange {
                row: coord.row,
                col: coord.col,
                side: self.side,
            });
        }
        Ok(self.position_unchecked(coord))
    }

    /// Caller must make sure `coord` lies on the board.
    pub(crate) fn position_unchecked(self, coord: Coord) -> Position {
        debug_assert!(self.contains(coord), "{coord:?} is off the board");
        Position(self.row_start(coord.row) + coord.col + 1)
    }

    /// All coordinates in position order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.side).flat_map(|row| (0..=row).map(move |col| Coord { row, col }))
    }

    pub fn positions(self) -> impl Iterator<Item = Position> {
        (1..=self.nr_holes()).map(Position)
    }
}

/// `side * (side + 1) / 2`, or `None` if that doesn't fit in a `usize`.
fn hole_count(side: usize) -> Option<usize> {
    side.checked_add(1)?.checked_mul(side).map(|n| n / 2)
}

impl Default for Triangle {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    // position numbers should follow the row-major order of the drawing above
    fn test_standard_numbering() {
        let shape = Triangle::standard();
        assert_eq!(shape.nr_holes(), 15);
        assert_eq!(shape.position_to_coord(Position(1)), Ok(Coord::new(0, 0)));
        assert_eq!(shape.position_to_coord(Position(5)), Ok(Coord::new(2, 1)));
        assert_eq!(shape.position_to_coord(Position(10)), Ok(Coord::new(3, 3)));
        assert_eq!(shape.position_to_coord(Position(11)), Ok(Coord::new(4, 0)));
        assert_eq!(shape.coord_to_position(Coord::new(4, 4)), Ok(Position(15)));
    }

    #[test]
    fn test_coords_follow_position_order() {
        let shape = Triangle::new(7).unwrap();
        let mut next = 1;
        for coord in shape.coords() {
            assert_eq!(shape.coord_to_position(coord), Ok(Position(next)));
            next += 1;
        }
        assert_eq!(next, shape.nr_holes() + 1);
    }

    #[test]
    fn test_out_of_range() {
        let shape = Triangle::standard();
        assert_eq!(
            shape.position_to_coord(Position(0)),
            Err(SolitaireError::OutOfRange {
                position: 0,
                nr_holes: 15
            })
        );
        assert!(shape.position_to_coord(Position(16)).is_err());
        assert_eq!(
            shape.coord_to_position(Coord::new(2, 3)),
            Err(SolitaireError::CoordOutOfRange {
                row: 2,
                col: 3,
                side: 5
            })
        );
        assert!(shape.coord_to_position(Coord::new(5, 0)).is_err());
    }

    #[test]
    fn test_shape_from_hole_count() {
        assert_eq!(Triangle::from_nr_holes(1), Triangle::new(1).ok());
        assert_eq!(Triangle::from_nr_holes(15), Some(Triangle::standard()));
        assert_eq!(Triangle::from_nr_holes(14), None);
        assert_eq!(Triangle::from_nr_holes(0), None);
        assert!(Triangle::new(0).is_err());
    }

    #[test]
    fn test_rejects_sides_too_large_to_number() {
        assert!(matches!(
            Triangle::new(usize::MAX),
            Err(SolitaireError::InvalidShape { .. })
        ));
        assert!(matches!(
            Triangle::new(usize::MAX / 2),
            Err(SolitaireError::InvalidShape { .. })
        ));

        let largest = (1usize << (usize::BITS / 2)) - 1;
        let shape = Triangle::new(largest).unwrap();
        assert_eq!(shape.nr_holes(), largest * (largest + 1) / 2);
    }

    proptest! {
        #[test]
        fn position_round_trip(side in 1usize..40, seed in any::<usize>()) {
            let shape = Triangle::new(side).unwrap();
            let pos = Position(seed % shape.nr_holes() + 1);
            let coord = shape.position_to_coord(pos).unwrap();
            prop_assert!(shape.contains(coord));
            prop_assert_eq!(shape.coord_to_position(coord), Ok(pos));
        }

        #[test]
        fn coord_round_trip(side in 1usize..40, row_seed in any::<usize>(), col_seed in any::<usize>()) {
            let shape = Triangle::new(side).unwrap();
            let row = row_seed % side;
            let coord = Coord::new(row, col_seed % shape.row_len(row));
            let pos = shape.coord_to_position(coord).unwrap();
            prop_assert_eq!(shape.position_to_coord(pos), Ok(coord));
        }
    }
}
