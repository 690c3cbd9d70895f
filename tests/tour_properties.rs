mod common;

use std::collections::BTreeSet;

use common::{ArbConfig, assert_valid_tour, lattice_edges};
use latticewalk::{
    Lattice, VertexId,
    balance::balance,
    band::{BandKind, decompose},
    plan_tour,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[quickcheck]
fn prop_bands_partition_lattice_edges(ArbConfig { config }: ArbConfig) -> TestResult {
    let lattice = Lattice::new(config.rows, config.cols).unwrap();
    let bands = decompose(&lattice, config.start, config.finish).unwrap();
    for (a, b) in lattice_edges(&lattice) {
        let owners: usize = bands
            .iter()
            .map(|band| band.graph().num_edges_between(a, b))
            .sum();
        if owners != 1 {
            return TestResult::error(format!("{config:?}: edge {a}-{b} in {owners} bands"));
        }
    }
    let total: usize = bands.iter().map(|band| band.graph().num_edges()).sum();
    TestResult::from_bool(total == lattice.num_edges())
}

#[quickcheck]
fn prop_balanced_bands_have_required_parity(ArbConfig { config }: ArbConfig) -> bool {
    let lattice = Lattice::new(config.rows, config.cols).unwrap();
    let bands = decompose(&lattice, config.start, config.finish).unwrap();
    [bands.start, bands.middle, bands.finish]
        .into_iter()
        .all(|mut band_graph| {
            let report = balance(&mut band_graph, &lattice).unwrap();
            let band = *band_graph.band();
            let graph = band_graph.graph();
            let odd: BTreeSet<VertexId> = graph.odd_vertices().collect();
            let expected: BTreeSet<VertexId> = match band.kind() {
                BandKind::Middle => [band.first_terminal(), band.last_terminal()].into(),
                _ => BTreeSet::new(),
            };
            let eulerian = graph.eulerian_kind();
            let admissible = match band.kind() {
                BandKind::Middle => {
                    eulerian.admits_path_between(band.first_terminal(), band.last_terminal())
                }
                _ => eulerian.admits_circuit(),
            };
            odd == expected && admissible && report.total_edges() == graph.num_edges()
        })
}

#[quickcheck]
fn prop_balancing_only_adds_lattice_edges(ArbConfig { config }: ArbConfig) -> bool {
    let lattice = Lattice::new(config.rows, config.cols).unwrap();
    let bands = decompose(&lattice, config.start, config.finish).unwrap();
    [bands.start, bands.middle, bands.finish]
        .into_iter()
        .all(|mut band_graph| {
            let before = band_graph.clone();
            balance(&mut band_graph, &lattice).unwrap();
            let (lo, hi) = band_graph.band().columns();
            band_graph.graph().vertices().all(|v| {
                band_graph.graph().neighbors(v).iter().all(|&n| {
                    let col = lattice.coord_of(n).col;
                    lattice.are_adjacent(v, n)
                        && (lo..=hi).contains(&col)
                        && band_graph.graph().num_edges_between(v, n)
                            >= before.graph().num_edges_between(v, n)
                })
            })
        })
}

#[quickcheck]
fn prop_tour_covers_lattice(ArbConfig { config }: ArbConfig) {
    let tour = plan_tour(&config).unwrap();
    assert_valid_tour(&config, &tour);
}

#[quickcheck]
fn prop_tour_consumes_every_balanced_edge(ArbConfig { config }: ArbConfig) -> bool {
    let tour = plan_tour(&config).unwrap();
    let balanced_edges: usize = tour
        .bands()
        .iter()
        .map(|report| report.balance.total_edges())
        .sum();
    tour.walk().num_steps() == balanced_edges
        && tour.repeated_edges()
            == tour
                .bands()
                .iter()
                .map(|report| report.balance.duplicated_edges())
                .sum::<usize>()
}

#[quickcheck]
fn prop_every_band_meets_requirement(ArbConfig { config }: ArbConfig) -> bool {
    let tour = plan_tour(&config).unwrap();
    tour.bands().iter().all(|report| report.satisfies_requirement())
}

#[quickcheck]
fn prop_tour_is_deterministic(ArbConfig { config }: ArbConfig) -> bool {
    plan_tour(&config).unwrap().walk() == plan_tour(&config).unwrap().walk()
}
