//! Degree balancing: duplicating lattice edges inside a band until the band
//! admits an Eulerian circuit (start and finish bands) or an Eulerian path
//! between its terminals (middle band).
//!
//! This is a best-effort augmentation, not a minimum-weight one.  A greedy
//! cursor walk fixes most parity defects cheaply by following the band's
//! boundary; whatever it leaves behind is paired up along shortest paths.

use std::collections::BTreeSet;

use bitvec::vec::BitVec;
use tracing::{debug, info_span, warn};

use crate::{
    band::{Band, BandGraph},
    error::{TourError, TourResult},
    lattice::{Lattice, VertexId},
    multigraph::Multigraph,
};

/// The cursor walk may take at most this many steps per band vertex.  Every
/// two steps either visit a fresh vertex or fix two unbalanced ones, so
/// well-behaved walks stay far below it.
const WALK_STEPS_PER_VERTEX: usize = 8;

/// Why the cursor walk stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkHalt {
    /// A circuit band's cursor came back to its terminal.
    ReturnedHome,
    /// The path band's cursor reached the finish terminal.
    ReachedFinish,
    /// No neighbour qualified as the next step.
    Stuck,
}

/// What balancing did to one band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceReport {
    /// Edges in the band before anything was duplicated.
    pub original_edges: usize,
    /// Edges duplicated by the cursor walk.
    pub walk_duplicates: usize,
    /// Edges duplicated while pairing the leftovers of the walk.
    pub completion_duplicates: usize,
    pub halt: WalkHalt,
    pub walk_steps: usize,
}

impl BalanceReport {
    pub fn duplicated_edges(&self) -> usize {
        self.walk_duplicates + self.completion_duplicates
    }

    pub fn total_edges(&self) -> usize {
        self.original_edges + self.duplicated_edges()
    }
}

/// Duplicates edges of `band_graph` until it has the parity its band
/// requires: no odd vertices for a circuit band, exactly its two terminals
/// odd for the path band.
///
/// Only lattice edges with both ends inside the band's columns are ever
/// duplicated, so every added edge is a legal re-traversal of the lattice.
/// That includes the seam column's vertical edges, which the band itself
/// does not own.
pub fn balance(band_graph: &mut BandGraph, lattice: &Lattice) -> TourResult<BalanceReport> {
    let band = *band_graph.band();
    let _span = info_span!("balance", band = %band.kind()).entered();

    let mut balancer = Balancer {
        lattice,
        band,
        graph: band_graph.graph_mut(),
        visited: BitVec::repeat(false, lattice.num_vertices()),
    };
    let original_edges = balancer.graph.num_edges();

    let (halt, walk_steps, walk_duplicates) = balancer.walk()?;
    debug!(?halt, walk_steps, walk_duplicates, "cursor walk finished");

    let completion_duplicates = balancer.complete()?;
    if completion_duplicates > 0 {
        warn!(
            band = %band.kind(),
            completion_duplicates,
            "cursor walk left unbalanced vertices; paired them along shortest paths"
        );
    }

    balancer.check()?;

    Ok(BalanceReport {
        original_edges,
        walk_duplicates,
        completion_duplicates,
        halt,
        walk_steps,
    })
}

struct Balancer<'a> {
    lattice: &'a Lattice,
    band: Band,
    graph: &'a mut Multigraph,
    visited: BitVec,
}

impl Balancer<'_> {
    /// Whether the parity of `v` differs from what the band needs.
    fn is_unbalanced(&self, v: VertexId) -> bool {
        self.graph.is_odd(v) != self.band.requires_odd(v)
    }

    /// An unvisited vertex of degree exactly two: a boundary cell that can
    /// take a duplicate edge without becoming a dead end.
    fn is_fresh_corridor(&self, v: VertexId) -> bool {
        self.graph.degree(v) == 2 && !self.visited[v.index()]
    }

    /// Lattice neighbours of `v` inside the band, in direction order.
    fn candidates(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let (lo, hi) = self.band.columns();
        self.lattice.neighbors_within(v, lo, hi)
    }

    fn first_candidate(
        &self,
        v: VertexId,
        pred: impl Fn(&Self, VertexId) -> bool,
    ) -> Option<VertexId> {
        self.candidates(v).find(|&n| pred(self, n))
    }

    /// Picks where the cursor at `cursor` goes next.  Returns the target and
    /// whether the edge to it should be duplicated.
    fn next_step(&self, cursor: VertexId) -> Option<(VertexId, bool)> {
        if self.is_unbalanced(cursor) {
            self.first_candidate(cursor, Self::is_unbalanced)
                .or_else(|| self.first_candidate(cursor, Self::is_fresh_corridor))
                .map(|n| (n, true))
        } else {
            self.first_candidate(cursor, |this, n| this.graph.is_odd(n))
                .or_else(|| self.first_candidate(cursor, Self::is_fresh_corridor))
                .map(|n| (n, false))
        }
    }

    /// Runs the cursor walk from the band's first terminal.  Returns how it
    /// halted, the number of steps taken and the number of edges duplicated.
    fn walk(&mut self) -> TourResult<(WalkHalt, usize, usize)> {
        let home = self.band.first_terminal();
        let finish = self.band.last_terminal();
        let circuit = self.band.kind().is_circuit();
        let bound = WALK_STEPS_PER_VERTEX * self.graph.num_vertices().max(1);

        let mut cursor = home;
        let mut duplicated = 0;
        self.visited.set(home.index(), true);

        for step in 1..=bound {
            let Some((next, duplicate)) = self.next_step(cursor) else {
                return Ok((WalkHalt::Stuck, step, duplicated));
            };
            if duplicate {
                self.graph.add_edge(cursor, next);
                duplicated += 1;
            }
            cursor = next;
            self.visited.set(cursor.index(), true);

            if circuit && cursor == home {
                return Ok((WalkHalt::ReturnedHome, step, duplicated));
            }
            if !circuit && cursor == finish {
                return Ok((WalkHalt::ReachedFinish, step, duplicated));
            }
        }

        Err(TourError::BalancingFailed {
            band: self.band.kind(),
            vertex: cursor,
            reason: format!("cursor walk did not halt within {bound} steps"),
        })
    }

    /// Pairs every vertex the walk left unbalanced with its nearest
    /// unbalanced partner and duplicates the shortest path between them.
    /// Vertices are taken in ascending id order.  Returns the number of
    /// edges duplicated.
    fn complete(&mut self) -> TourResult<usize> {
        let mut pending: BTreeSet<VertexId> = self
            .graph
            .vertices()
            .filter(|&v| self.is_unbalanced(v))
            .collect();
        let lattice = self.lattice;
        let (lo, hi) = self.band.columns();
        let mut duplicated = 0;

        while let Some(from) = pending.pop_first() {
            let path = pathfinding::prelude::bfs(
                &from,
                |v| lattice.neighbors_within(*v, lo, hi).collect::<Vec<_>>(),
                |v| pending.contains(v),
            );
            let Some(path) = path else {
                return Err(TourError::BalancingFailed {
                    band: self.band.kind(),
                    vertex: from,
                    reason: "no unbalanced partner reachable inside the band".to_string(),
                });
            };
            for pair in path.windows(2) {
                self.graph.add_edge(pair[0], pair[1]);
            }
            duplicated += path.len() - 1;
            if let Some(&to) = path.last() {
                pending.remove(&to);
            }
        }
        Ok(duplicated)
    }

    /// Verifies the exact odd-vertex target of the band.
    fn check(&self) -> TourResult<()> {
        match self.graph.vertices().find(|&v| self.is_unbalanced(v)) {
            None => Ok(()),
            Some(vertex) => Err(TourError::BalancingFailed {
                band: self.band.kind(),
                vertex,
                reason: format!(
                    "{} odd-degree vertices remain",
                    self.graph.odd_vertices().count()
                ),
            }),
        }
    }
}
