#![allow(dead_code)]

use std::collections::BTreeMap;

use latticewalk::{Coord, Lattice, TourConfig, Tour, VertexId};
use quickcheck::Arbitrary;

/// A valid configuration on a lattice of at most 8 rows and 11 columns.
#[derive(Debug, Clone, Copy)]
pub struct ArbConfig {
    pub config: TourConfig,
}

impl Arbitrary for ArbConfig {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let rows = 1 + usize::arbitrary(g) % 8;
        let cols = 2 + usize::arbitrary(g) % 10;
        let start_col = usize::arbitrary(g) % (cols - 1);
        let finish_col = start_col + 1 + usize::arbitrary(g) % (cols - 1 - start_col);
        let start = Coord::new(usize::arbitrary(g) % rows, start_col);
        let finish = Coord::new(usize::arbitrary(g) % rows, finish_col);
        ArbConfig {
            config: TourConfig {
                rows,
                cols,
                start,
                finish,
            },
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let TourConfig {
            rows,
            cols,
            start,
            finish,
        } = self.config;
        let mut smaller = Vec::new();
        if rows > 1 && start.row < rows - 1 && finish.row < rows - 1 {
            smaller.push(TourConfig {
                rows: rows - 1,
                ..self.config
            });
        }
        if finish.col < cols - 1 {
            smaller.push(TourConfig {
                cols: cols - 1,
                ..self.config
            });
        }
        Box::new(smaller.into_iter().map(|config| ArbConfig { config }))
    }
}

fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    (a.min(b), a.max(b))
}

/// How often the tour crosses each undirected edge.
pub fn edge_visits(tour: &Tour) -> BTreeMap<(VertexId, VertexId), usize> {
    let mut visits = BTreeMap::new();
    for (a, b) in tour.walk().steps() {
        *visits.entry(edge_key(a, b)).or_insert(0) += 1;
    }
    visits
}

pub fn lattice_edges(lattice: &Lattice) -> Vec<(VertexId, VertexId)> {
    lattice
        .vertex_ids()
        .flat_map(|v| {
            lattice
                .neighbors(v)
                .iter()
                .filter(move |&&n| v < n)
                .map(move |&n| (v, n))
        })
        .collect()
}

/// Panics unless `tour` is a lattice walk from the configured start to the
/// configured finish that crosses every lattice edge.
pub fn assert_valid_tour(config: &TourConfig, tour: &Tour) {
    let lattice = tour.lattice();
    let coords = tour.coords();
    assert_eq!(coords.first(), Some(&config.start), "{config:?}");
    assert_eq!(coords.last(), Some(&config.finish), "{config:?}");

    for (a, b) in tour.walk().steps() {
        assert!(lattice.are_adjacent(a, b), "{config:?}: step {a}-{b}");
    }

    let visits = edge_visits(tour);
    for edge in lattice_edges(lattice) {
        assert!(visits.contains_key(&edge), "{config:?}: edge {edge:?} never walked");
    }
    assert_eq!(visits.len(), lattice.num_edges(), "{config:?}");
}
