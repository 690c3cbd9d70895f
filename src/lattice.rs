use std::{fmt, str::FromStr};

use derivative::Derivative;

use crate::error::TourError;

/// Identifier of a lattice cell.  Ids are assigned row-major, so the cell at
/// `(row, col)` of a lattice with `cols` columns has id `row * cols + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(value: usize) -> Self {
        VertexId(value)
    }
}

impl From<VertexId> for usize {
    fn from(val: VertexId) -> Self {
        val.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `(row, col)` position in the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( {} , {} )", self.row, self.col)
    }
}

/// Parses `"row,col"`.
impl FromStr for Coord {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TourError::invalid(format!("expected `row,col`, got {s:?}"));
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let col = col.trim().parse().map_err(|_| invalid())?;
        Ok(Coord { row, col })
    }
}

/// The four lattice directions, in the order neighbours are enumerated.
///
/// This order is the tie-break for every "first matching neighbour" choice
/// made while balancing and extracting, so changing it changes the tours
/// the crate produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// `(row, col)` offset of one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
        }
    }

    /// The cell one step away from `coord`, if it lies inside a
    /// `rows` x `cols` lattice.
    pub fn step(self, coord: Coord, rows: usize, cols: usize) -> Option<Coord> {
        let (dr, dc) = self.offset();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Coord { row, col })
    }
}

/// The immutable base graph of an R x C 4-connected lattice.
///
/// Holds the id/coordinate lookup table and the adjacency of every cell,
/// with neighbours listed in [`Direction::ALL`] order.  Nothing mutates a
/// lattice after [`Lattice::new`] returns; band graphs are copies.
#[derive(Derivative)]
#[derivative(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    #[derivative(Debug = "ignore")]
    coords: Vec<Coord>,
    #[derivative(Debug = "ignore")]
    adjacency: Vec<Vec<VertexId>>,
}

impl Lattice {
    pub fn new(rows: usize, cols: usize) -> Result<Self, TourError> {
        Self::check_dimensions(rows, cols)?;

        let coords: Vec<Coord> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Coord { row, col }))
            .collect();

        let adjacency = coords
            .iter()
            .map(|&coord| {
                Direction::ALL
                    .iter()
                    .filter_map(|dir| dir.step(coord, rows, cols))
                    .map(|n| VertexId(n.row * cols + n.col))
                    .collect()
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            coords,
            adjacency,
        })
    }

    pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), TourError> {
        if rows == 0 || cols == 0 {
            return Err(TourError::invalid(format!(
                "lattice dimensions must be positive, got {rows}x{cols}"
            )));
        }
        rows.checked_mul(cols)
            .map(|_| ())
            .ok_or_else(|| TourError::invalid(format!("lattice {rows}x{cols} is too large")))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_vertices(&self) -> usize {
        self.coords.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn id_of(&self, coord: Coord) -> Option<VertexId> {
        self.contains(coord)
            .then(|| VertexId(coord.row * self.cols + coord.col))
    }

    /// Panics if `id` is not a vertex of this lattice.
    pub fn coord_of(&self, id: VertexId) -> Coord {
        self.coords[id.0]
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.coords.len()).map(VertexId)
    }

    /// Neighbours of `id` in [`Direction::ALL`] order.
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        &self.adjacency[id.0]
    }

    /// Neighbours of `id` whose column lies in `lo..=hi`, in
    /// [`Direction::ALL`] order.
    pub fn neighbors_within(
        &self,
        id: VertexId,
        lo: usize,
        hi: usize,
    ) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency[id.0].iter().copied().filter(move |&n| {
            let col = self.coords[n.0].col;
            lo <= col && col <= hi
        })
    }

    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.adjacency[a.0].contains(&b)
    }
}
