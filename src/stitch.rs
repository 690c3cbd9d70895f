use tracing::{info, info_span, warn};

use crate::{
    balance::{BalanceReport, balance},
    band::{BandGraph, BandKind, decompose},
    config::TourConfig,
    error::{TourError, TourResult},
    euler::extract,
    lattice::{Coord, Lattice},
    multigraph::EulerianKind,
    walk::Walk,
};

/// Joins the three band walks into one tour: the whole start circuit, then
/// the middle path and the finish circuit, each without the vertex it
/// shares with the walk before it.
pub fn stitch(start_circuit: Walk, middle_path: &Walk, finish_circuit: &Walk) -> TourResult<Walk> {
    let _span = info_span!("stitch").entered();
    let joints = [
        (BandKind::Middle, start_circuit.last_vertex(), middle_path),
        (BandKind::Finish, middle_path.last_vertex(), finish_circuit),
    ];
    for (band, expected, walk) in joints {
        if walk.first_vertex() != expected {
            return Err(TourError::IncompleteTraversal {
                band,
                vertex: walk.first_vertex(),
                remaining_edges: 0,
                detail: "walk does not start where the previous band's walk ends",
            });
        }
    }

    let mut tour = start_circuit;
    tour.extend_with(middle_path);
    tour.extend_with(finish_circuit);
    Ok(tour)
}

/// What happened to one band on the way to the tour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandReport {
    pub kind: BandKind,
    /// Inclusive column range.
    pub columns: (usize, usize),
    /// Classification of the balanced band, taken just before extraction.
    pub eulerian: EulerianKind,
    pub balance: BalanceReport,
    /// Vertices in the band's extracted walk.
    pub walk_len: usize,
}

impl BandReport {
    /// Whether the band had the property its walk needs: a circuit for the
    /// start and finish bands, a path for the middle band.
    pub fn satisfies_requirement(&self) -> bool {
        if self.kind.is_circuit() {
            self.eulerian.admits_circuit()
        } else {
            matches!(self.eulerian, EulerianKind::Path { .. })
        }
    }

    /// One human-readable line stating the band's Eulerian property.
    pub fn diagnostic(&self) -> String {
        let (lo, hi) = self.columns;
        let verdict = if self.satisfies_requirement() {
            "ok"
        } else {
            "NOT SATISFIED"
        };
        format!(
            "{} band (columns {lo}-{hi}): {} [{verdict}]; {} edges duplicated",
            self.kind,
            self.eulerian,
            self.balance.duplicated_edges()
        )
    }
}

/// A stitched tour over a whole lattice.
#[derive(Clone, Debug)]
pub struct Tour {
    lattice: Lattice,
    walk: Walk,
    bands: [BandReport; 3],
}

impl Tour {
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn walk(&self) -> &Walk {
        &self.walk
    }

    /// Reports for the start, middle and finish bands, in that order.
    pub fn bands(&self) -> &[BandReport; 3] {
        &self.bands
    }

    pub fn band(&self, kind: BandKind) -> &BandReport {
        match kind {
            BandKind::Start => &self.bands[0],
            BandKind::Middle => &self.bands[1],
            BandKind::Finish => &self.bands[2],
        }
    }

    pub fn coords(&self) -> Vec<Coord> {
        self.walk.coords(&self.lattice).collect()
    }

    /// Edges walked more than once, counted over the whole tour.
    pub fn repeated_edges(&self) -> usize {
        self.walk.num_steps() - self.lattice.num_edges()
    }
}

/// Plans a tour for `config`: builds the lattice, cuts it into bands,
/// balances and extracts each band, and stitches the walks.
pub fn plan_tour(config: &TourConfig) -> TourResult<Tour> {
    config.validate()?;
    let _span = info_span!("plan_tour", rows = config.rows, cols = config.cols).entered();

    let lattice = Lattice::new(config.rows, config.cols)?;
    let bands = decompose(&lattice, config.start, config.finish)?;

    let (start_walk, start_report) = solve_band(bands.start, &lattice)?;
    let (middle_walk, middle_report) = solve_band(bands.middle, &lattice)?;
    let (finish_walk, finish_report) = solve_band(bands.finish, &lattice)?;

    let walk = stitch(start_walk, &middle_walk, &finish_walk)?;
    info!(
        steps = walk.num_steps(),
        lattice_edges = lattice.num_edges(),
        "stitched tour"
    );

    Ok(Tour {
        lattice,
        walk,
        bands: [start_report, middle_report, finish_report],
    })
}

/// Balances one band, records its Eulerian property and extracts its walk.
fn solve_band(mut band_graph: BandGraph, lattice: &Lattice) -> TourResult<(Walk, BandReport)> {
    let balance = balance(&mut band_graph, lattice)?;
    let band = *band_graph.band();
    let eulerian = band_graph.graph().eulerian_kind();

    let walk = extract(band_graph)?;
    let report = BandReport {
        kind: band.kind(),
        columns: band.columns(),
        eulerian,
        balance,
        walk_len: walk.len(),
    };
    if report.satisfies_requirement() {
        info!(band = %report.kind, eulerian = %report.eulerian, "band ready for extraction");
    } else {
        warn!(band = %report.kind, eulerian = %report.eulerian, "band does not meet its Eulerian requirement");
    }
    Ok((walk, report))
}
