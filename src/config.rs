use crate::{
    band::check_terminals,
    error::TourResult,
    lattice::{Coord, Lattice},
};

pub const STATIC_ROWS: usize = 5;
pub const STATIC_COLS: usize = 10;
pub const STATIC_START: Coord = Coord::new(1, 2);
pub const STATIC_FINISH: Coord = Coord::new(3, 7);

/// Everything needed to plan one tour.
///
/// Fields are public so callers can build a configuration directly;
/// [`crate::stitch::plan_tour`] validates it before doing any work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TourConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Coord,
    pub finish: Coord,
}

impl TourConfig {
    pub fn new(rows: usize, cols: usize, start: Coord, finish: Coord) -> TourResult<Self> {
        let config = Self {
            rows,
            cols,
            start,
            finish,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the dimensions are positive and the terminals are distinct,
    /// inside the lattice, and ordered left to right by column.
    pub fn validate(&self) -> TourResult<()> {
        Lattice::check_dimensions(self.rows, self.cols)?;
        check_terminals(self.rows, self.cols, self.start, self.finish)
    }
}

/// The fixed 5x10 demonstration run from (1, 2) to (3, 7).
impl Default for TourConfig {
    fn default() -> Self {
        Self {
            rows: STATIC_ROWS,
            cols: STATIC_COLS,
            start: STATIC_START,
            finish: STATIC_FINISH,
        }
    }
}
