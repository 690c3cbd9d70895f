//! Stack-based Eulerian circuit and path extraction (Hierholzer's
//! algorithm, iterative form).
//!
//! The extractor owns the graph it walks and deletes every edge as it
//! crosses it.  Neighbours are always taken from the front of a vertex's
//! sequence, so the result is fully determined by the neighbour order the
//! graph was built with.

use tracing::{debug, info_span};

use crate::{
    band::{BandGraph, BandKind},
    error::{TourError, TourResult},
    lattice::VertexId,
    multigraph::Multigraph,
    walk::Walk,
};

/// Extracts the walk a balanced band calls for: a circuit from its terminal
/// for the start and finish bands, a path between its terminals for the
/// middle band.
pub fn extract(band_graph: BandGraph) -> TourResult<Walk> {
    let (band, graph) = band_graph.into_parts();
    if band.kind().is_circuit() {
        extract_circuit(graph, band.kind(), band.first_terminal())
    } else {
        extract_path(graph, band.kind(), band.first_terminal(), band.last_terminal())
    }
}

/// Extracts a closed walk from `start` over every edge of `graph`.
pub fn extract_circuit(mut graph: Multigraph, band: BandKind, start: VertexId) -> TourResult<Walk> {
    let _span = info_span!("extract", %band, mode = "circuit").entered();
    let walk = drain(&mut graph, band, start)?;
    if !walk.is_closed() {
        return Err(TourError::IncompleteTraversal {
            band,
            vertex: walk.last_vertex(),
            remaining_edges: 0,
            detail: "circuit did not return to its start",
        });
    }
    debug!(steps = walk.num_steps(), "extracted circuit");
    Ok(walk)
}

/// Extracts an open walk from `start` to `end` over every edge of `graph`.
///
/// `start` and `end` must be the graph's only odd vertices.  Starting from
/// an odd vertex, the stack can only first get stuck at the other odd one,
/// so the reversed output runs `start` to `end`; closed detours hanging off
/// any vertex of the trail are spliced in where the stack unwinds past
/// them.
pub fn extract_path(
    mut graph: Multigraph,
    band: BandKind,
    start: VertexId,
    end: VertexId,
) -> TourResult<Walk> {
    let _span = info_span!("extract", %band, mode = "path").entered();
    let walk = drain(&mut graph, band, start)?;
    if walk.last_vertex() != end {
        return Err(TourError::IncompleteTraversal {
            band,
            vertex: walk.last_vertex(),
            remaining_edges: 0,
            detail: "path did not end at the finish terminal",
        });
    }
    debug!(steps = walk.num_steps(), "extracted path");
    Ok(walk)
}

/// Runs the edge-consuming stack walk from `start` and returns the vertices
/// in traversal order.  Fails if any edge is left once the stack empties.
fn drain(graph: &mut Multigraph, band: BandKind, start: VertexId) -> TourResult<Walk> {
    // Each iteration either crosses (and deletes) an edge or pops a vertex,
    // and a vertex is popped once per edge plus once for `start`.
    let bound = 2 * graph.num_edges() + 1;
    let mut stack = vec![start];
    let mut out = Vec::with_capacity(graph.num_edges() + 1);

    for _ in 0..bound {
        let Some(&top) = stack.last() else {
            break;
        };
        match graph.first_neighbor(top) {
            Some(next) => {
                graph.remove_edge(top, next);
                stack.push(next);
            }
            None => {
                stack.pop();
                out.push(top);
            }
        }
    }

    if let Some(&vertex) = stack.last() {
        return Err(TourError::IncompleteTraversal {
            band,
            vertex,
            remaining_edges: graph.num_edges(),
            detail: "stack did not empty within its bound",
        });
    }
    if let Some(vertex) = graph.first_vertex_with_edges() {
        return Err(TourError::IncompleteTraversal {
            band,
            vertex,
            remaining_edges: graph.num_edges(),
            detail: "edges unreachable from the start",
        });
    }

    out.reverse();
    Walk::from_vertices(out).ok_or(TourError::IncompleteTraversal {
        band,
        vertex: start,
        remaining_edges: 0,
        detail: "no walk produced",
    })
}
