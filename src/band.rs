use std::fmt;

use tracing::{debug, info_span};

use crate::{
    error::{TourError, TourResult},
    lattice::{Coord, Lattice, VertexId},
    multigraph::Multigraph,
};

/// Which of the three column bands a graph was cut from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandKind {
    Start,
    Middle,
    Finish,
}

impl BandKind {
    pub const ALL: [BandKind; 3] = [BandKind::Start, BandKind::Middle, BandKind::Finish];

    /// Start and finish bands are walked as closed circuits; the middle band
    /// as an open path.
    pub fn is_circuit(self) -> bool {
        !matches!(self, BandKind::Middle)
    }
}

impl fmt::Display for BandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BandKind::Start => "start",
            BandKind::Middle => "middle",
            BandKind::Finish => "finish",
        })
    }
}

/// A column interval `lo..=hi` of the lattice together with the walk
/// endpoints that live in it.
///
/// `seam` names the column whose vertical edges are left to the middle
/// band; it is `None` for the middle band itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    kind: BandKind,
    lo: usize,
    hi: usize,
    seam: Option<usize>,
    first: VertexId,
    last: VertexId,
}

impl Band {
    pub(crate) fn start(lo: usize, hi: usize, terminal: VertexId) -> Self {
        Self {
            kind: BandKind::Start,
            lo,
            hi,
            seam: Some(hi),
            first: terminal,
            last: terminal,
        }
    }

    pub(crate) fn middle(lo: usize, hi: usize, start: VertexId, finish: VertexId) -> Self {
        Self {
            kind: BandKind::Middle,
            lo,
            hi,
            seam: None,
            first: start,
            last: finish,
        }
    }

    pub(crate) fn finish(lo: usize, hi: usize, terminal: VertexId) -> Self {
        Self {
            kind: BandKind::Finish,
            lo,
            hi,
            seam: Some(lo),
            first: terminal,
            last: terminal,
        }
    }

    pub fn kind(&self) -> BandKind {
        self.kind
    }

    /// Inclusive column range `(lo, hi)`.
    pub fn columns(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }

    pub fn seam(&self) -> Option<usize> {
        self.seam
    }

    pub fn contains_col(&self, col: usize) -> bool {
        self.lo <= col && col <= self.hi
    }

    /// Where the band's walk begins.
    pub fn first_terminal(&self) -> VertexId {
        self.first
    }

    /// Where the band's walk ends; the same as the first terminal for
    /// circuit bands.
    pub fn last_terminal(&self) -> VertexId {
        self.last
    }

    /// Whether `v` must keep odd degree once the band is balanced.  Only the
    /// path band's two terminals do.
    pub fn requires_odd(&self, v: VertexId) -> bool {
        !self.kind.is_circuit() && (v == self.first || v == self.last)
    }
}

/// A band and the independently owned graph cut for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandGraph {
    band: Band,
    graph: Multigraph,
}

impl BandGraph {
    pub fn band(&self) -> &Band {
        &self.band
    }

    pub fn graph(&self) -> &Multigraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Multigraph {
        &mut self.graph
    }

    pub fn into_parts(self) -> (Band, Multigraph) {
        (self.band, self.graph)
    }
}

/// The three band graphs cut from a lattice.
#[derive(Clone, Debug)]
pub struct Bands {
    pub start: BandGraph,
    pub middle: BandGraph,
    pub finish: BandGraph,
}

impl Bands {
    pub fn iter(&self) -> impl Iterator<Item = &BandGraph> {
        [&self.start, &self.middle, &self.finish].into_iter()
    }
}

/// Checks that `start` and `finish` are usable walk endpoints for a
/// `rows` x `cols` lattice.
pub fn check_terminals(rows: usize, cols: usize, start: Coord, finish: Coord) -> TourResult<()> {
    for (name, coord) in [("start", start), ("finish", finish)] {
        if coord.row >= rows || coord.col >= cols {
            return Err(TourError::invalid(format!(
                "{name} {coord} lies outside the {rows}x{cols} lattice"
            )));
        }
    }
    if start == finish {
        return Err(TourError::invalid(format!(
            "start and finish are both {start}"
        )));
    }
    if start.col >= finish.col {
        return Err(TourError::invalid(format!(
            "start column {} must be left of finish column {}",
            start.col, finish.col
        )));
    }
    Ok(())
}

/// Cuts `lattice` into the start band (columns `0..=start.col`), the middle
/// band (`start.col..=finish.col`) and the finish band
/// (`finish.col..=cols-1`).
///
/// The vertical edges of the start and finish columns belong to the middle
/// band only, so the three graphs partition the lattice's edges.
pub fn decompose(lattice: &Lattice, start: Coord, finish: Coord) -> TourResult<Bands> {
    let _span = info_span!("decompose").entered();
    check_terminals(lattice.rows(), lattice.cols(), start, finish)?;

    let (Some(s), Some(f)) = (lattice.id_of(start), lattice.id_of(finish)) else {
        return Err(TourError::invalid("terminals outside the lattice"));
    };

    let bands = Bands {
        start: carve(lattice, Band::start(0, start.col, s)),
        middle: carve(lattice, Band::middle(start.col, finish.col, s, f)),
        finish: carve(lattice, Band::finish(finish.col, lattice.cols() - 1, f)),
    };
    for band_graph in bands.iter() {
        let (lo, hi) = band_graph.band().columns();
        debug!(
            band = %band_graph.band().kind(),
            lo,
            hi,
            vertices = band_graph.graph().num_vertices(),
            edges = band_graph.graph().num_edges(),
            "carved band"
        );
    }
    Ok(bands)
}

/// Copies the lattice adjacency restricted to the band's columns, dropping
/// the seam column's vertical edges.  Neighbour order is inherited from the
/// lattice.
fn carve(lattice: &Lattice, band: Band) -> BandGraph {
    let mut graph = Multigraph::new(lattice.num_vertices());
    for row in 0..lattice.rows() {
        for col in band.lo..=band.hi {
            let coord = Coord { row, col };
            let Some(v) = lattice.id_of(coord) else {
                continue;
            };
            let on_seam = band.seam == Some(col);
            let neighbors = lattice
                .neighbors_within(v, band.lo, band.hi)
                .filter(|&n| !(on_seam && lattice.coord_of(n).col == col))
                .collect();
            graph.set_neighbors(v, neighbors);
        }
    }
    BandGraph { band, graph }
}
