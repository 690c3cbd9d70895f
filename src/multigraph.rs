use std::fmt;

use bitvec::vec::BitVec;

use crate::lattice::VertexId;

/// How a graph stands with respect to Eulerian walks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EulerianKind {
    /// Every vertex has even degree and all edges are connected.
    Circuit,
    /// Exactly two vertices have odd degree and all edges are connected.
    Path { ends: (VertexId, VertexId) },
    /// The edges are connected but the wrong number of vertices are odd.
    Unbalanced { odd_vertices: usize },
    /// The edges fall into more than one connected component.
    Disconnected { components: usize },
    /// No edges at all; the only walk is a single vertex.
    Empty,
}

impl EulerianKind {
    pub fn admits_circuit(&self) -> bool {
        matches!(self, EulerianKind::Circuit | EulerianKind::Empty)
    }

    pub fn admits_path_between(&self, a: VertexId, b: VertexId) -> bool {
        match self {
            EulerianKind::Path { ends } => *ends == (a.min(b), a.max(b)),
            _ => false,
        }
    }
}

impl fmt::Display for EulerianKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EulerianKind::Circuit => write!(f, "Eulerian circuit"),
            EulerianKind::Path { ends } => {
                write!(f, "Eulerian path between {} and {}", ends.0, ends.1)
            }
            EulerianKind::Unbalanced { odd_vertices } => {
                write!(f, "not Eulerian ({odd_vertices} odd-degree vertices)")
            }
            EulerianKind::Disconnected { components } => {
                write!(f, "not Eulerian ({components} edge components)")
            }
            EulerianKind::Empty => write!(f, "empty (trivial circuit)"),
        }
    }
}

/// An undirected multigraph over a shared vertex id space.
///
/// Each member vertex owns an ordered neighbour sequence; a neighbour that
/// appears `k` times stands for `k` parallel edges.  Every edge is stored
/// in both endpoints' sequences, and removal takes out the first occurrence
/// from each so the remaining order is preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multigraph {
    adjacency: Vec<Vec<VertexId>>,
    members: BitVec,
}

impl Multigraph {
    /// Creates a graph with no members over ids `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); capacity],
            members: BitVec::repeat(false, capacity),
        }
    }

    pub fn insert_vertex(&mut self, v: VertexId) {
        self.members.set(v.index(), true);
    }

    /// Replaces the neighbour sequence of `v`, making it a member.  The
    /// caller is responsible for keeping the graph symmetric.
    pub(crate) fn set_neighbors(&mut self, v: VertexId, neighbors: Vec<VertexId>) {
        self.insert_vertex(v);
        self.adjacency[v.index()] = neighbors;
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.members.get(v.index()).is_some_and(|bit| *bit)
    }

    /// Member vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.members.iter_ones().map(VertexId::from)
    }

    pub fn num_vertices(&self) -> usize {
        self.members.count_ones()
    }

    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.adjacency[v.index()]
    }

    pub fn first_neighbor(&self, v: VertexId) -> Option<VertexId> {
        self.adjacency[v.index()].first().copied()
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency[v.index()].len()
    }

    pub fn is_odd(&self, v: VertexId) -> bool {
        self.degree(v) % 2 == 1
    }

    pub fn total_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn num_edges(&self) -> usize {
        self.total_degree() / 2
    }

    pub fn num_edges_between(&self, a: VertexId, b: VertexId) -> usize {
        self.adjacency[a.index()].iter().filter(|&&n| n == b).count()
    }

    /// Adds one more `a`–`b` edge, appending each endpoint to the other's
    /// sequence.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) {
        debug_assert_ne!(a, b, "lattice graphs have no self-loops");
        self.insert_vertex(a);
        self.insert_vertex(b);
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
    }

    /// Removes one `a`–`b` edge.  Returns false if there was none.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        let Some(i) = self.adjacency[a.index()].iter().position(|&n| n == b) else {
            return false;
        };
        let Some(j) = self.adjacency[b.index()].iter().position(|&n| n == a) else {
            return false;
        };
        self.adjacency[a.index()].remove(i);
        self.adjacency[b.index()].remove(j);
        true
    }

    pub fn odd_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().filter(|&v| self.is_odd(v))
    }

    pub fn first_vertex_with_edges(&self) -> Option<VertexId> {
        self.vertices().find(|&v| self.degree(v) > 0)
    }

    /// Classifies the graph by parity and edge connectivity.  Vertices
    /// without edges are ignored for connectivity.
    pub fn eulerian_kind(&self) -> EulerianKind {
        let with_edges: Vec<VertexId> = self.vertices().filter(|&v| self.degree(v) > 0).collect();
        if with_edges.is_empty() {
            return EulerianKind::Empty;
        }

        let components = pathfinding::prelude::connected_components(&with_edges, |v| {
            self.neighbors(*v).to_vec()
        });
        if components.len() > 1 {
            return EulerianKind::Disconnected {
                components: components.len(),
            };
        }

        let odd: Vec<VertexId> = self.odd_vertices().collect();
        match odd.as_slice() {
            [] => EulerianKind::Circuit,
            [a, b] => EulerianKind::Path { ends: (*a, *b) },
            _ => EulerianKind::Unbalanced {
                odd_vertices: odd.len(),
            },
        }
    }
}

/// Renders the graph as one `id -> neighbours` line per vertex with edges.
impl fmt::Display for Multigraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.vertices() {
            let neighbors = self.neighbors(v);
            if neighbors.is_empty() {
                continue;
            }
            write!(f, "{v} ->")?;
            for n in neighbors {
                write!(f, " {n}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
