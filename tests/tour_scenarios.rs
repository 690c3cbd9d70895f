mod common;

use common::{assert_valid_tour, edge_visits};
use latticewalk::{Coord, TourConfig, TourError, band::BandKind, plan_tour};

fn config(rows: usize, cols: usize, start: (usize, usize), finish: (usize, usize)) -> TourConfig {
    TourConfig::new(rows, cols, start.into(), finish.into()).unwrap()
}

#[test]
fn test_static_configuration() {
    let config = TourConfig::default();
    let tour = plan_tour(&config).unwrap();
    assert_valid_tour(&config, &tour);

    assert_eq!(tour.lattice().num_edges(), 85);
    let edges: Vec<_> = tour
        .bands()
        .iter()
        .map(|report| (report.balance.original_edges, report.balance.total_edges()))
        .collect();
    assert_eq!(edges, vec![(18, 24), (49, 55), (18, 24)]);
    assert_eq!(tour.walk().num_steps(), 103);
    assert_eq!(tour.walk().len(), 104);
    assert_eq!(tour.repeated_edges(), 18);
}

#[test]
fn test_static_repeats_match_duplicates() {
    let tour = plan_tour(&TourConfig::default()).unwrap();
    let visits = edge_visits(&tour);
    let repeats: usize = visits.values().map(|&n| n - 1).sum();
    assert_eq!(repeats, tour.repeated_edges());
    assert_eq!(visits.values().max(), Some(&3));
}

#[test]
fn test_adjacent_columns() {
    for (start, finish) in [((1, 4), (3, 5)), ((0, 4), (4, 5)), ((2, 4), (2, 5))] {
        let config = config(5, 10, start, finish);
        let tour = plan_tour(&config).unwrap();
        assert_valid_tour(&config, &tour);
        assert_eq!(tour.band(BandKind::Middle).columns, (4, 5));
    }
}

#[test]
fn test_terminals_on_outer_columns() {
    let config = config(4, 7, (2, 0), (1, 6));
    let tour = plan_tour(&config).unwrap();
    assert_valid_tour(&config, &tour);

    let start = tour.band(BandKind::Start);
    let finish = tour.band(BandKind::Finish);
    assert_eq!(start.balance.total_edges(), 0);
    assert_eq!(start.walk_len, 1);
    assert_eq!(finish.balance.total_edges(), 0);
    assert_eq!(finish.walk_len, 1);
    assert_eq!(
        tour.walk().len(),
        tour.band(BandKind::Middle).walk_len
    );
}

#[test]
fn test_single_row() {
    let config = config(1, 6, (0, 1), (0, 4));
    let tour = plan_tour(&config).unwrap();
    let expected: Vec<Coord> = [(0, 1), (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 4)]
        .into_iter()
        .map(Coord::from)
        .collect();
    assert_eq!(tour.coords(), expected);
    assert_eq!(tour.band(BandKind::Middle).balance.duplicated_edges(), 0);
}

#[test]
fn test_two_columns() {
    for rows in 1..=6 {
        for start_row in 0..rows {
            for finish_row in 0..rows {
                let config = config(rows, 2, (start_row, 0), (finish_row, 1));
                let tour = plan_tour(&config).unwrap();
                assert_valid_tour(&config, &tour);
            }
        }
    }
}

#[test]
fn test_finish_left_of_start_is_rejected() {
    let config = TourConfig {
        rows: 5,
        cols: 10,
        start: Coord::new(3, 7),
        finish: Coord::new(1, 2),
    };
    let err = plan_tour(&config).unwrap_err();
    assert!(matches!(err, TourError::InvalidConfiguration { .. }));
}

#[test]
fn test_same_column_is_rejected() {
    let result = TourConfig::new(5, 10, Coord::new(0, 4), Coord::new(3, 4));
    assert!(matches!(result, Err(TourError::InvalidConfiguration { .. })));
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let config = TourConfig {
        rows: 3,
        cols: 4,
        start: Coord::new(0, 0),
        finish: Coord::new(3, 3),
    };
    assert!(matches!(
        plan_tour(&config),
        Err(TourError::InvalidConfiguration { .. })
    ));
}

#[cfg(feature = "slow_tests")]
#[test]
fn test_every_small_configuration() {
    for rows in 1..=10 {
        for cols in 2..=12 {
            for start_col in 0..cols - 1 {
                for finish_col in start_col + 1..cols {
                    for start_row in 0..rows {
                        for finish_row in 0..rows {
                            let config =
                                config(rows, cols, (start_row, start_col), (finish_row, finish_col));
                            let tour = plan_tour(&config).unwrap();
                            assert_valid_tour(&config, &tour);
                        }
                    }
                }
            }
        }
    }
}
